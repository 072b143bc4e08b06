//! Crate error type.
//!
//! Store operations never fail; these cover the terminal, the logger and
//! command-line configuration.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TasklistError {
    /// Terminal setup, drawing or event polling failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TasklistError>;

impl TasklistError {
    pub fn logging(msg: impl Into<String>) -> Self {
        Self::Logging(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
