//! Logging configuration using tracing
//!
//! stdout belongs to `--print` / `--json` output, so logs only ever go to a
//! rolling file.

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Environment variable controlling the log filter.
pub const LOG_ENV: &str = "GOF_LOG";

const LOG_FILE_NAME: &str = "git-open-file.log";
const DEFAULT_FILTER: &str = "git_open_file=info,gof_app=info,gof_git=info,warn";

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/git-open-file/logs/` (platform
/// equivalent elsewhere). Log level is controlled by the `GOF_LOG`
/// environment variable.
///
/// # Examples
/// ```bash
/// GOF_LOG=debug git-open-file README.md
/// GOF_LOG=gof_git=trace git-open-file --check
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_NAME);

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::debug!("git-open-file starting, log directory: {}", log_dir.display());

    Ok(())
}

/// Get the log directory path
fn get_log_directory() -> Result<PathBuf> {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    Ok(base.join("git-open-file").join("logs"))
}

/// Get the log file path for the current day
pub fn get_current_log_file() -> Result<PathBuf> {
    let dir = get_log_directory()?;
    Ok(dir.join(LOG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_lives_in_app_directory() {
        let file = get_current_log_file().unwrap();
        assert!(file.ends_with("git-open-file/logs/git-open-file.log"));
    }
}
