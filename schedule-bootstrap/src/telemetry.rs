use std::path::Path;

use tracing::subscriber::DefaultGuard;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "schedule-sync.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Console-only subscriber for this thread, used while the config that names `log_dir` is loading.
/// Drop the guard before calling `init_tracing`.
pub fn init_startup_tracing() -> DefaultGuard {
    let subscriber = tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer());
    tracing::subscriber::set_default(subscriber)
}

/// Console output always; a daily JSON log file when `log_dir` is set.
/// The returned guard must live until the process exits.
pub fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer())
        .with(file_layer)
        .init();
    guard
}
