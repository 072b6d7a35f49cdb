use anyhow::Result;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::settings::{LogFormat, LoggingConfig};

/// Log to a daily rolling file. The terminal belongs to the TUI, so nothing
/// is written to stdout here.
pub fn init_logger(config: &LoggingConfig) -> Result<()> {
    // RUST_LOG wins over the configured level
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.level.clone());

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("cafe-menu")
        .filename_suffix("log")
        .build(&config.directory)?;

    let filter = EnvFilter::try_new(&log_level)?;

    match config.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(file_appender)
                        .with_target(true)
                        .with_level(true),
                )
                .try_init()?;
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(file_appender)
                        .with_target(true)
                        .with_level(true)
                        .with_ansi(false),
                )
                .try_init()?;
        }
    }

    Ok(())
}
