// 📝 Logging - tracing to a daily rolling file
//
// The TUI owns the terminal, so events go to a file. The summary mode adds a
// stderr layer on top.

use crate::config::Config;
use anyhow::{Context as AnyhowContext, Result};
use std::ffi::OsStr;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Daily rolling appender for `log_file`. Fails if the directory can't be created.
pub fn file_appender(log_file: &Path) -> Result<RollingFileAppender> {
    let log_dir = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = log_file
        .file_name()
        .unwrap_or(OsStr::new("grade-tracker.log"))
        .to_string_lossy()
        .into_owned();

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(log_file_name)
        .build(log_dir)
        .with_context(|| format!("Failed to open log file in {}", log_dir.display()))
}

/// Install the global subscriber. Keep the guard alive until exit so the
/// background writer flushes.
pub fn init(config: &Config, to_stderr: bool) -> Result<WorkerGuard> {
    let appender = file_appender(&config.log_file)?;
    let (non_blocking_file, guard) = tracing_appender::non_blocking(appender);

    let file_filter = EnvFilter::try_new(&config.log_filter)
        .with_context(|| format!("Invalid log filter: {}", config.log_filter))?;
    let file_layer = fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(non_blocking_file)
        .with_filter(file_filter);

    let stderr_layer = if to_stderr {
        let stderr_filter = EnvFilter::try_new(&config.log_filter)
            .with_context(|| format!("Invalid log filter: {}", config.log_filter))?;
        Some(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(stderr_filter),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("grade-tracker-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_file_appender_creates_directory() {
        let dir = scratch_dir("logs-ok");
        let log_file = dir.join("nested").join("grades.log");

        assert!(file_appender(&log_file).is_ok());
        assert!(dir.join("nested").is_dir());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_appender_unwritable_path_is_error() {
        let dir = scratch_dir("logs-blocked");
        // A regular file where the log directory should go
        let blocker = dir.join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let err = file_appender(&blocker.join("grades.log")).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to open log file"));

        let _ = fs::remove_dir_all(&dir);
    }
}
