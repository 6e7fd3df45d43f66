//! Editor settings.
//!
//! Layering, lowest first: built-in defaults, `editor.toml` / `editor.json5`
//! in the config directory, `LOST_EDITOR_*` environment variables, and
//! finally the command line flags.

use std::path::{Path, PathBuf};
use std::{env, fs};

use directories::ProjectDirs;
use lazy_static::lazy_static;
use serde::Deserialize;

use crate::cli::Cli;

pub const ENV_PREFIX: &str = "LOST_EDITOR";

lazy_static! {
    pub static ref DATA_FOLDER: Option<PathBuf> =
        env::var(format!("{ENV_PREFIX}_DATA")).ok().map(PathBuf::from);
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{ENV_PREFIX}_CONFIG")).ok().map(PathBuf::from);
}

const CONFIG_FILES: [(&str, config::FileFormat); 2] = [
    ("editor.json5", config::FileFormat::Json5),
    ("editor.toml", config::FileFormat::Toml),
];

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct EditorSettings {
    pub data_dir: PathBuf,
    pub config_dir: PathBuf,
    /// The Lost Engine `config.yml` being edited.
    pub file: PathBuf,
    #[serde(default)]
    pub textures: Option<PathBuf>,
    #[serde(default)]
    pub sounds: Option<PathBuf>,
    /// `EnvFilter` directive for the log file.
    pub log_level: String,
}

/// Values given on the command line; they win over every other layer.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub file: Option<PathBuf>,
    pub textures: Option<PathBuf>,
    pub sounds: Option<PathBuf>,
}

impl From<&Cli> for Overrides {
    fn from(cli: &Cli) -> Self {
        Self {
            file: cli.file.clone(),
            textures: cli.textures.clone(),
            sounds: cli.sounds.clone(),
        }
    }
}

impl EditorSettings {
    pub fn load(cli: &Cli) -> Result<Self, config::ConfigError> {
        Self::load_from(&get_config_dir(), &get_data_dir(), None, &Overrides::from(cli))
    }

    /// `env` replaces the process environment when given.
    pub fn load_from(
        config_dir: &Path,
        data_dir: &Path,
        env: Option<config::Map<String, String>>,
        overrides: &Overrides,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("data_dir", path_value(data_dir))?
            .set_default("config_dir", path_value(config_dir))?
            .set_default("file", "config.yml")?
            .set_default("log_level", "info")?;

        for (file, format) in CONFIG_FILES {
            let source = config::File::from(config_dir.join(file))
                .format(format)
                .required(false);
            builder = builder.add_source(source);
        }

        builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX).source(env));

        let settings: Self = builder
            .set_override_option("file", overrides.file.as_deref().map(path_value))?
            .set_override_option("textures", overrides.textures.as_deref().map(path_value))?
            .set_override_option("sounds", overrides.sounds.as_deref().map(path_value))?
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}

fn path_value(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

pub fn get_data_dir() -> PathBuf {
    if let Some(dir) = DATA_FOLDER.clone() {
        dir
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(dir) = CONFIG_FOLDER.clone() {
        dir
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "lost-engine", env!("CARGO_PKG_NAME"))
}

pub fn ensure_data_dir(settings: &EditorSettings) -> std::io::Result<()> {
    if !settings.data_dir.exists() {
        fs::create_dir_all(&settings.data_dir)?;
    }
    Ok(())
}
