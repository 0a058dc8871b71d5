//! Runtime configuration for building a [`Logger`](crate::Logger).
//!
//! This is the resolved form of the TOML config in `daolog_config`: level
//! names are parsed into numeric [`Level`]s and an empty context variable
//! becomes `None`.

use std::path::PathBuf;

use daolog_config::{Config, LevelSetting};
use daolog_traits::{ContextSource, EnvContext, NoContext};

use crate::error::BuildError;
use crate::level::Level;
use crate::logger::resolve_source;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerCfg {
    /// Append target.
    pub file: PathBuf,
    /// Initial threshold.
    pub level: Level,
    /// Fixed source label; `None` leaves the ambient context in charge.
    pub source: Option<String>,
    /// Environment variable holding the ambient context; `None` disables it.
    pub context_var: Option<String>,
}

impl LoggerCfg {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            level: Level::INFO,
            source: None,
            context_var: None,
        }
    }

    /// Ambient context reading `context_var`, or none when it is unset.
    pub fn context(&self) -> Box<dyn ContextSource + Send + Sync> {
        match &self.context_var {
            Some(var) => Box::new(EnvContext::new(var.clone())),
            None => Box::new(NoContext),
        }
    }

    /// The source a logger built from this config would report, resolved
    /// without touching the log file.
    pub fn log_source(&self) -> String {
        resolve_source(self.source.as_deref().unwrap_or_default(), &*self.context())
    }
}

impl TryFrom<&LevelSetting> for Level {
    type Error = BuildError;

    fn try_from(setting: &LevelSetting) -> Result<Self, Self::Error> {
        match setting {
            LevelSetting::Value(v) => Ok(Level::new(*v)),
            LevelSetting::Name(name) => Ok(name.parse::<Level>()?),
        }
    }
}

impl TryFrom<&Config> for LoggerCfg {
    type Error = BuildError;

    fn try_from(cfg: &Config) -> Result<Self, Self::Error> {
        let level = match &cfg.logger.level {
            Some(setting) => Level::try_from(setting)?,
            None => Level::INFO,
        };
        Ok(Self {
            file: cfg.logger.file.clone(),
            level,
            source: cfg.logger.source.clone().filter(|s| !s.is_empty()),
            context_var: cfg.context_var().map(str::to_string),
        })
    }
}
