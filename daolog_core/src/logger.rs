//! Level-gated append-only file logger.
//!
//! Every call that passes the gate opens the file in append mode, writes the
//! whole line with a single `write_all`, and drops the handle before
//! returning. No handle, buffer, or lock outlives a call; concurrent writers
//! to the same path rely on the platform's append-mode semantics.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use daolog_traits::{Clock, ContextSource, NoContext, SystemClock};

use crate::config::LoggerCfg;
use crate::error::{LoggerError, Result};
use crate::level::{Level, Tag};

/// Message written when construction finds no file at the target path.
pub const CREATED_MESSAGE: &str = "Log file created.";

/// Render one log line: `(TAG) [timestamp] <source> message\n`.
pub fn format_line(tag: Tag, timestamp: &str, source: &str, message: &str) -> String {
    format!("({tag}) [{timestamp}] <{source}> {message}\n")
}

/// Source label for a line: `explicit` if non-empty, else the non-empty
/// ambient value, else `""`.
pub(crate) fn resolve_source(explicit: &str, context: &dyn ContextSource) -> String {
    if !explicit.is_empty() {
        return explicit.to_string();
    }
    context.current().filter(|c| !c.is_empty()).unwrap_or_default()
}

pub struct Logger {
    path: PathBuf,
    level: Level,
    source: String,
    context: Box<dyn ContextSource + Send + Sync>,
    clock: Box<dyn Clock + Send + Sync>,
}

impl core::fmt::Debug for Logger {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Logger")
            .field("path", &self.path)
            .field("level", &self.level)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Bind a logger to `path` with the given threshold.
    ///
    /// If `path` does not exist yet, an info line announcing the new file is
    /// written immediately (subject to the gate), which also creates it.
    pub fn new(path: impl Into<PathBuf>, level: Level) -> Result<Self> {
        Self::builder(path).level(level).build()
    }

    pub fn builder(path: impl Into<PathBuf>) -> LoggerBuilder {
        LoggerBuilder::new(path)
    }

    /// Build from runtime config, reading the ambient context from the
    /// configured environment variable.
    pub fn from_config(cfg: &LoggerCfg) -> Result<Self> {
        let mut b = Self::builder(&cfg.file).level(cfg.level);
        if let Some(src) = &cfg.source {
            b = b.source(src.clone());
        }
        b.context = Some(cfg.context());
        b.build()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn log_level(&self) -> Level {
        self.level
    }

    /// No validation: any integer threshold is accepted.
    pub fn set_log_level(&mut self, level: impl Into<Level>) {
        self.level = level.into();
    }

    pub fn set_log_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
    }

    /// Explicit source if set, else the ambient context, else `""`.
    pub fn log_source(&self) -> String {
        resolve_source(&self.source, &*self.context)
    }

    #[inline]
    pub fn is_enabled(&self, level: Level) -> bool {
        level.passes(self.level)
    }

    /// Append `message` verbatim (no newline added) if `level` passes the
    /// threshold. Returns whether anything was written.
    pub fn log(&self, message: &str, level: Level) -> Result<bool> {
        if !self.gate(level) {
            return Ok(false);
        }
        self.append(message.as_bytes())?;
        Ok(true)
    }

    pub fn log_debug(&self, message: &str) -> Result<bool> {
        self.log_tagged(Tag::Debug, message, Tag::Debug.default_level())
    }

    pub fn log_info(&self, message: &str) -> Result<bool> {
        self.log_tagged(Tag::Info, message, Tag::Info.default_level())
    }

    pub fn log_error(&self, message: &str) -> Result<bool> {
        self.log_tagged(Tag::Error, message, Tag::Error.default_level())
    }

    /// Gated at `CRITICAL`, the same as [`Logger::log_error`]; only the tag differs.
    pub fn log_fatal(&self, message: &str) -> Result<bool> {
        self.log_tagged(Tag::Fatal, message, Tag::Fatal.default_level())
    }

    /// Format `message` under `tag` and gate it at an explicit `level`.
    pub fn log_tagged(&self, tag: Tag, message: &str, level: Level) -> Result<bool> {
        if !self.gate(level) {
            return Ok(false);
        }
        let line = format_line(tag, &self.clock.timestamp(), &self.log_source(), message);
        self.append(line.as_bytes())?;
        Ok(true)
    }

    fn gate(&self, level: Level) -> bool {
        let pass = self.is_enabled(level);
        if !pass {
            tracing::trace!(
                level = level.value(),
                threshold = self.level.value(),
                "log call suppressed"
            );
        }
        pass
    }

    fn append(&self, bytes: &[u8]) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| LoggerError::Open {
                path: self.path.clone(),
                source,
            })?;
        file.write_all(bytes).map_err(|source| LoggerError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Builder for [`Logger`]; defaults are threshold `INFO`, empty source, no
/// ambient context, and the local system clock.
pub struct LoggerBuilder {
    path: PathBuf,
    level: Level,
    source: String,
    context: Option<Box<dyn ContextSource + Send + Sync>>,
    clock: Option<Box<dyn Clock + Send + Sync>>,
}

impl LoggerBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            level: Level::INFO,
            source: String::new(),
            context: None,
            clock: None,
        }
    }

    pub fn level(mut self, level: impl Into<Level>) -> Self {
        self.level = level.into();
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn context(mut self, context: impl ContextSource + Send + Sync + 'static) -> Self {
        self.context = Some(Box::new(context));
        self
    }

    pub fn clock(mut self, clock: impl Clock + Send + Sync + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    pub fn build(self) -> Result<Logger> {
        let logger = Logger {
            path: self.path,
            level: self.level,
            source: self.source,
            context: self.context.unwrap_or_else(|| Box::new(NoContext)),
            clock: self.clock.unwrap_or_else(|| Box::new(SystemClock)),
        };
        if !logger.path.exists() && logger.log_info(CREATED_MESSAGE)? {
            tracing::debug!(path = %logger.path.display(), "log file created");
        }
        Ok(logger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_layout() {
        let line = format_line(Tag::Error, "2011-06-01T12:30:00+02:00", "q=1", "boom");
        assert_eq!(line, "(ERR) [2011-06-01T12:30:00+02:00] <q=1> boom\n");
    }

    #[test]
    fn empty_source_renders_empty_brackets() {
        let line = format_line(Tag::Info, "t", "", "m");
        assert_eq!(line, "(IFO) [t] <> m\n");
    }

    #[test]
    fn explicit_source_wins_over_context() {
        let ctx = || Some("q=1".to_string());
        assert_eq!(resolve_source("cron", &ctx), "cron");
        assert_eq!(resolve_source("", &ctx), "q=1");
        assert_eq!(resolve_source("", &|| Some(String::new())), "");
        assert_eq!(resolve_source("", &NoContext), "");
    }

    #[test]
    fn logger_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Logger>();
    }
}
