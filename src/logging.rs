//! File logging bootstrap.
//!
//! The terminal belongs to the UI, so log records go to a size-rotated
//! file. Initialization happens at most once per process. The handle lives
//! in a static and is never dropped, so call `shutdown` before exiting.

use std::path::{Path, PathBuf};

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;

use crate::{
    config::LogLevel,
    error::{Result, TasklistError},
};

const LOG_FILE_BASENAME: &str = "tasklist";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    log_dir: PathBuf,
    logger: LoggerHandle,
}

/// Starts file logging in `log_dir`.
///
/// Repeated calls with the same directory are no-ops; a different
/// directory is rejected.
pub fn init_logging(level: LogLevel, log_dir: &Path) -> Result<()> {
    if let Some(state) = LOGGING_STATE.get() {
        return check_same_dir(&state.log_dir, log_dir);
    }

    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState> {
        std::fs::create_dir_all(log_dir).map_err(|err| {
            TasklistError::logging(format!(
                "failed to create log directory `{}`: {err}",
                log_dir.display()
            ))
        })?;

        let logger = Logger::try_with_str(level.as_str())
            .map_err(|err| TasklistError::logging(format!("invalid log level: {err}")))?
            .log_to_file(
                FileSpec::default()
                    .directory(log_dir)
                    .basename(LOG_FILE_BASENAME),
            )
            .rotate(
                Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(MAX_LOG_FILES),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start()
            .map_err(|err| TasklistError::logging(format!("failed to start logger: {err}")))?;

        info!(
            "event=app_start level={} log_dir={} version={}",
            level.as_str(),
            log_dir.display(),
            env!("CARGO_PKG_VERSION")
        );

        Ok(LoggingState {
            log_dir: log_dir.to_path_buf(),
            logger,
        })
    })?;

    check_same_dir(&state.log_dir, log_dir)
}

/// Flushes buffered records and stops the writer. No-op when logging was
/// never started.
pub fn shutdown() {
    if let Some(state) = LOGGING_STATE.get() {
        info!("event=logging_shutdown");
        state.logger.flush();
        state.logger.shutdown();
    }
}

fn check_same_dir(active: &Path, requested: &Path) -> Result<()> {
    if active == requested {
        return Ok(());
    }
    Err(TasklistError::logging(format!(
        "logging already initialized at `{}`; refusing to switch to `{}`",
        active.display(),
        requested.display()
    )))
}
