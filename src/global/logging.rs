use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::global::config::{AppSettings, LogRotation, LoggingConfig};

/// Install the global subscriber. The returned guard flushes the file writer on drop
/// and must be kept alive for the life of the process.
pub fn init(settings: &AppSettings) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| filter_directive(&settings.log_level).into());

    let console_layer = settings.logging.log_to_console.then(fmt::layer);

    let (file_layer, guard) = if settings.logging.log_to_file {
        let (writer, guard) = tracing_appender::non_blocking(file_appender(&settings.logging));
        let layer = fmt::layer().with_writer(writer).with_ansi(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}

fn filter_directive(log_level: &str) -> String {
    format!("portfolio_api={},info", log_level)
}

fn file_appender(logging: &LoggingConfig) -> rolling::RollingFileAppender {
    let directory = &logging.log_directory;
    let prefix = &logging.log_file_prefix;

    match logging.log_rotation {
        LogRotation::Daily => rolling::daily(directory, prefix),
        LogRotation::Hourly => rolling::hourly(directory, prefix),
        LogRotation::Never => rolling::never(directory, prefix),
    }
}
