//! Logging configuration using the tracing ecosystem.
//!
//! Logs go to a daily rotating file rather than the terminal so the palette
//! is never drawn over.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log filter if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "quickhelp=info,warn";

/// Initialize the logging system.
///
/// Sets up tracing with:
/// - Daily rotating file appender in `log_dir` (or the platform default)
/// - Log level configuration via the `RUST_LOG` environment variable
///
/// # Log Directory
///
/// Without an explicit directory, logs are stored in the platform-specific
/// local data directory:
/// - Linux: `~/.local/share/quickhelp/logs/`
/// - macOS: `~/Library/Application Support/quickhelp/logs/`
/// - Windows: `C:\Users\<User>\AppData\Local\quickhelp\logs\`
///
/// # Errors
///
/// Returns an error if the log directory cannot be determined or created,
/// or if a global subscriber is already installed.
pub fn init(log_dir: Option<PathBuf>) -> anyhow::Result<()> {
    let log_dir = match log_dir {
        Some(dir) => dir,
        None => get_log_directory()?,
    };
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "quickhelp.log");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "quickhelp starting up");
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(())
}

/// The platform log directory with `quickhelp/logs` appended.
fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("quickhelp").join("logs"))
}

/// Log application shutdown.
pub fn shutdown() {
    tracing::info!("quickhelp shutting down");
}
