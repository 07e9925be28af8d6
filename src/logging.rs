//! Tracing setup for the visualizer and the headless trainer.
//!
//! Both entry points install the same subscriber: an env-filtered console layer, plus a
//! per-launch file under `<app dir>/logs` for the desktop app. The trainer logs to stderr
//! so its stdout stays a clean report.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use time::{
    OffsetDateTime, UtcOffset, format_description::BorrowedFormatItem, macros::format_description,
};
use tracing_appender::{
    non_blocking::{NonBlocking, WorkerGuard},
    rolling::{InitError, RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, Registry, fmt, fmt::writer::BoxMakeWriter, prelude::*};

use crate::app_dirs::{self, AppDirError};

/// Launch logs kept on disk, including the current one.
const MAX_LOG_FILES: usize = 10;
const LOG_FILE_PREFIX: &str = "petalmap_";
const LOG_FILE_EXT: &str = ".log";

/// Set once a subscriber is installed; holds the file writer's guard when there is one.
static INSTALLED: OnceLock<Option<WorkerGuard>> = OnceLock::new();

/// Reasons logging could not be set up; callers degrade to no logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("No log directory: {0}")]
    AppDir(#[from] AppDirError),
    #[error("Failed to format log filename time: {0}")]
    FormatTime(#[from] time::error::Format),
    #[error("Failed to open log file in {dir}: {source}")]
    OpenFile { dir: PathBuf, source: InitError },
    #[error("Failed to prune old logs in {dir}: {source}")]
    Prune {
        dir: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Log to stdout and to a fresh timestamped file, pruning older launch logs.
///
/// Subsequent calls are no-ops.
pub fn init() -> Result<(), LoggingError> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }
    let dir = app_dirs::logs_dir()?;
    let file_name = format_log_file_name(now_local_or_utc())?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(&file_name)
        .build(&dir)
        .map_err(|source| LoggingError::OpenFile {
            dir: dir.clone(),
            source,
        })?;
    let (writer, guard) = tracing_appender::non_blocking(appender);
    prune_old_logs(&dir, MAX_LOG_FILES)?;

    install(BoxMakeWriter::new(std::io::stdout), Some(writer))?;
    let _ = INSTALLED.set(Some(guard));
    tracing::info!("Logging to {}", dir.join(&file_name).display());
    Ok(())
}

/// Log to stderr only, for command-line tools. Subsequent calls are no-ops.
pub fn init_stderr() -> Result<(), LoggingError> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }
    install(BoxMakeWriter::new(std::io::stderr), None)?;
    let _ = INSTALLED.set(None);
    Ok(())
}

fn install(console: BoxMakeWriter, file: Option<NonBlocking>) -> Result<(), LoggingError> {
    let timer = fmt::time::OffsetTime::new(local_offset(), TIMESTAMP_FORMAT);
    let file_layer = file.map(|writer| {
        fmt::layer()
            .with_ansi(false)
            .with_timer(timer.clone())
            .with_writer(writer)
    });
    let console_layer = fmt::layer().with_timer(timer).with_writer(console);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = Registry::default()
        .with(filter)
        .with(console_layer)
        .with(file_layer);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// `petalmap_<date>_<time>.log`; names sort chronologically.
fn format_log_file_name(now: OffsetDateTime) -> Result<String, time::error::Format> {
    const NAME_FORMAT: &[BorrowedFormatItem<'_>] =
        format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
    Ok(format!(
        "{LOG_FILE_PREFIX}{}{LOG_FILE_EXT}",
        now.format(NAME_FORMAT)?
    ))
}

/// Delete the oldest launch logs so at most `keep` remain. Other files are left alone.
fn prune_old_logs(dir: &Path, keep: usize) -> Result<(), LoggingError> {
    let prune_err = |source| LoggingError::Prune {
        dir: dir.to_path_buf(),
        source,
    };
    let mut names: Vec<String> = fs::read_dir(dir)
        .map_err(prune_err)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_ok_and(|ft| ft.is_file()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.starts_with(LOG_FILE_PREFIX) && name.ends_with(LOG_FILE_EXT))
        .collect();
    names.sort_unstable();
    let excess = names.len().saturating_sub(keep);
    for name in &names[..excess] {
        fs::remove_file(dir.join(name)).map_err(prune_err)?;
    }
    Ok(())
}

fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

fn now_local_or_utc() -> OffsetDateTime {
    OffsetDateTime::now_utc().to_offset(local_offset())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn log_filename_has_timestamp_and_prefix() {
        let fixed = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let name = format_log_file_name(fixed).unwrap();
        assert_eq!(name, "petalmap_2023-11-14_22-13-20.log");
    }

    #[test]
    fn filenames_sort_in_launch_order() {
        let earlier = format_log_file_name(OffsetDateTime::from_unix_timestamp(1_699_999_999).unwrap());
        let later = format_log_file_name(OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap());
        assert!(earlier.unwrap() < later.unwrap());
    }

    #[test]
    fn prune_drops_oldest_launch_logs_only() {
        let dir = tempdir().unwrap();
        for second in 0..5 {
            let name = format!("petalmap_2024-01-01_10-00-0{second}.log");
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::write(dir.path().join("model.bin"), [0u8; 4]).unwrap();
        fs::write(dir.path().join("other.log"), b"").unwrap();

        prune_old_logs(dir.path(), 3).unwrap();
        let mut left: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        left.sort();
        assert_eq!(
            left,
            vec![
                "model.bin",
                "other.log",
                "petalmap_2024-01-01_10-00-02.log",
                "petalmap_2024-01-01_10-00-03.log",
                "petalmap_2024-01-01_10-00-04.log",
            ]
        );
    }

    #[test]
    fn prune_with_room_to_spare_keeps_everything() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("petalmap_2024-01-01_10-00-00.log"), b"").unwrap();
        prune_old_logs(dir.path(), MAX_LOG_FILES).unwrap();
        assert!(dir.path().join("petalmap_2024-01-01_10-00-00.log").exists());
    }
}
