//! Error reports and crash handling for the editor binary.
//!
//! Besides installing the color-eyre hooks, this module remembers which
//! `config.yml` the session works on so a crash report can name it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use color_eyre::Result;
use tracing::error;

static INIT: OnceLock<()> = OnceLock::new();
static CONFIG_FILE: OnceLock<PathBuf> = OnceLock::new();

/// Record the config file of this session. Only the first call counts.
pub fn set_config_file(path: &Path) {
    if CONFIG_FILE.set(path.to_path_buf()).is_err() {
        tracing::debug!(path = %path.display(), "config file already recorded");
    }
}

pub fn config_file() -> Option<&'static Path> {
    CONFIG_FILE.get().map(PathBuf::as_path)
}

/// Text shown under a panic report.
pub fn crash_note(config: Option<&Path>) -> String {
    match config {
        Some(path) => format!(
            "The editor crashed while working on {}.\n\
             Saves replace that file in one step, so it holds either the previous \
             or the last saved version. Input not yet saved is lost.",
            path.display()
        ),
        None => "The editor crashed before a config file was opened.".to_string(),
    }
}

/// Panic section rendered at panic time, after the config file is known.
struct CrashSection;

impl fmt::Display for CrashSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crash_note(config_file()))
    }
}

/// Install the color-eyre report and panic hooks. Safe to call more than once.
///
/// The panic hook puts the terminal back into cooked mode before anything is
/// printed, so a panic inside the wizard never leaves the shell in raw mode.
pub fn init() -> Result<()> {
    if INIT.get().is_some() {
        return Ok(());
    }

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .panic_section(CrashSection)
        .capture_span_trace_by_default(false)
        .display_location_section(false)
        .display_env_section(false)
        .try_into_hooks()?;
    eyre_hook.install()?;

    std::panic::set_hook(Box::new(move |panic_info| {
        if let Err(err) = crate::tui::restore() {
            error!("Unable to restore terminal: {:?}", err);
        }

        #[cfg(not(debug_assertions))]
        {
            use human_panic::{handle_dump, metadata, print_msg};
            let metadata = metadata!();
            let file_path = handle_dump(&metadata, panic_info);
            if print_msg(file_path, &metadata).is_err() {
                eprintln!("editor crashed; the crash report could not be printed");
            }
            eprintln!("{}", panic_hook.panic_report(panic_info));
        }
        let msg = format!("{}", panic_hook.panic_report(panic_info));
        error!(
            config = ?config_file(),
            "editor panicked: {}",
            strip_ansi_escapes::strip_str(msg)
        );

        #[cfg(debug_assertions)]
        {
            better_panic::Settings::auto()
                .most_recent_first(false)
                .lineno_suffix(true)
                .verbosity(better_panic::Verbosity::Full)
                .create_panic_handler()(panic_info);
        }

        std::process::exit(libc::EXIT_FAILURE);
    }));

    let _ = INIT.set(());

    Ok(())
}
