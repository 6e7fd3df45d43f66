use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("yaml syntax error: {0}")]
    Syntax(#[from] yaml_edit::YamlError),

    #[error("unsupported layout: {0}")]
    Layout(String),

    #[error("edit of {section}.{key} was rejected: {reason}")]
    Rejected {
        section: String,
        key: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("id {raw:?} is empty after sanitization")]
    EmptyKey { raw: String },

    #[error("missing required value {tab}.{field}")]
    MissingValue { tab: String, field: String },

    #[error("record serialization failed: {0}")]
    Serialize(serde_yaml::Error),

    #[error(transparent)]
    Document(#[from] DocumentError),
}
