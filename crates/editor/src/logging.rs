use color_eyre::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::settings::{self, EditorSettings};

pub const LOG_FILE: &str = "editor.log";

/// Route `tracing` output into `<data dir>/editor.log`.
///
/// Nothing is written to the terminal: the wizard owns the screen. `RUST_LOG`
/// overrides the configured `log_level`. Keep the returned guard alive until
/// exit so buffered lines get flushed.
pub fn init(settings: &EditorSettings) -> Result<WorkerGuard> {
    settings::ensure_data_dir(settings)?;

    let file_appender = tracing_appender::rolling::never(&settings.data_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.log_level)?,
    };

    let file_layer = fmt::Layer::default()
        .with_target(true)
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_filter(filter);

    tracing_subscriber::registry().with(file_layer).try_init()?;
    Ok(guard)
}
