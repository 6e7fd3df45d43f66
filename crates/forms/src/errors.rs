use thiserror::Error;

/// Structural problems in a `FormSchema`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("duplicate tab id: {0}")]
    DuplicateTab(String),

    #[error("duplicate field {field} in tab {tab}")]
    DuplicateField { tab: String, field: String },

    #[error("choice field {field} in tab {tab} has no options")]
    MissingOptions { tab: String, field: String },
}

/// Why a wizard transition was refused.
///
/// These are expected outcomes of navigation (a disabled button), not faults.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Blocked {
    #[error("tab {tab} is incomplete: {message}")]
    Incomplete { tab: String, message: String },

    #[error("already on the first tab")]
    FirstTab,

    #[error("already on the last tab")]
    LastTab,

    #[error("submit is only possible from the last tab")]
    NotLastTab,

    #[error("tab {0} is not visible")]
    HiddenTab(String),

    #[error("unknown tab: {0}")]
    UnknownTab(String),

    #[error("unknown field {field} in tab {tab}")]
    UnknownField { tab: String, field: String },

    #[error("the wizard is already closed")]
    Finished,
}
