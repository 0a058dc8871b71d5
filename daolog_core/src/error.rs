use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::level::ParseLevelError;

/// Failure to append a line to the log file. Never swallowed by the logger.
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("could not open the log file for writing: {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not write to the log file: {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LoggerError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Open { path, .. } | Self::Write { path, .. } => path,
        }
    }

    pub fn is_open_failure(&self) -> bool {
        matches!(self, Self::Open { .. })
    }
}

/// Invalid runtime logger configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("invalid config: {0}")]
    Level(#[from] ParseLevelError),
}

/// Data-access failure carrying the database error descriptor and the
/// affected-row count next to the human message.
///
/// Displays as the message alone; the other fields are for handlers.
/// `affected_rows` is signed because drivers report `-1` after a failed
/// statement.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct DaoError {
    message: String,
    error: String,
    affected_rows: i64,
}

impl DaoError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: String::new(),
            affected_rows: 0,
        }
    }

    pub fn with_details(
        message: impl Into<String>,
        error: impl Into<String>,
        affected_rows: i64,
    ) -> Self {
        Self {
            message: message.into(),
            error: error.into(),
            affected_rows,
        }
    }

    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = error.into();
        self
    }

    #[must_use]
    pub fn with_affected_rows(mut self, affected_rows: i64) -> Self {
        self.affected_rows = affected_rows;
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Database error code or description; empty when none was given.
    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn affected_rows(&self) -> i64 {
        self.affected_rows
    }
}

pub type Result<T> = std::result::Result<T, LoggerError>;
