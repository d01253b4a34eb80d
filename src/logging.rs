//! Logging setup
//!
//! The TUI owns the terminal, so events go to a daily-rotated file.
//! `TASKBOARD_LOG` overrides the configured level (e.g. "taskboard=debug").

use std::fs;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::error::Result;

pub const LOG_ENV: &str = "TASKBOARD_LOG";
pub const LOG_FILE: &str = "taskboard.log";

pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("taskboard={}", level.to_lowercase())))
}

/// Install the file subscriber. Fails if the log directory cannot be
/// created or a global subscriber is already set.
pub fn init_logging(config: &Config) -> Result<()> {
    let log_dir = config.log_dir();
    fs::create_dir_all(&log_dir)?;
    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE);

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_target(true)
        .with_level(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter(&config.log_level))
        .with(file_layer)
        .try_init()?;
    Ok(())
}
