use std::{env, path::PathBuf, time::Duration};

use chrono::format::{Item, StrftimeItems};
use clap::{Parser, ValueEnum};

use crate::error::{Result, TasklistError};

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// In-memory task list for the terminal.
#[derive(Debug, Parser)]
#[command(name = "tasklist", version, about)]
pub struct Args {
    /// Log verbosity
    #[arg(long, value_enum, default_value_t = LogLevel::Info, env = "TASKLIST_LOG_LEVEL")]
    pub log_level: LogLevel,

    /// Directory for log files [default: <temp dir>/tasklist]
    #[arg(long, env = "TASKLIST_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Disable logging
    #[arg(long)]
    pub no_log: bool,

    /// strftime pattern for the "Added on" date
    #[arg(long, default_value = "%-m/%-d/%Y")]
    pub date_format: String,

    /// Event poll interval in milliseconds
    #[arg(long, default_value_t = 250, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_rate: u64,
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(TasklistError::config(format!(
                "invalid date format `{}`",
                self.date_format
            )));
        }
        Ok(())
    }

    pub fn log_dir(&self) -> PathBuf {
        match &self.log_dir {
            Some(dir) => dir.clone(),
            None => env::temp_dir().join("tasklist"),
        }
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate)
    }
}
