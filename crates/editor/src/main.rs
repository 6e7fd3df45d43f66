use clap::Parser;
use color_eyre::Result;
use editor::cli::{Cli, Cmd};
use editor::settings::EditorSettings;
use editor::{commands, errors, logging};

#[tokio::main]
pub async fn main() -> Result<()> {
    errors::init()?;
    let args = Cli::parse();
    let settings = EditorSettings::load(&args)?;
    errors::set_config_file(&settings.file);
    let _log_guard = logging::init(&settings)?;
    tracing::debug!(?settings, "settings loaded");

    match args.cmd {
        Cmd::New { kind } => commands::new_entry(&settings, kind.into()).await,
        Cmd::List { section } => commands::list(&settings, section.as_deref()),
        Cmd::Remove { section, key } => commands::remove(&settings, &section, &key),
    }
}
