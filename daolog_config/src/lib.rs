#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema for wiring a DAO logger from a TOML file.
//!
//! - `Config` and its sections are deserialized from TOML and validated.
//! - Level names are kept as written here; `daolog_core` resolves them to
//!   numeric levels when building the runtime logger config.
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Conventional CGI variable carrying the request's query string.
pub const DEFAULT_CONTEXT_VAR: &str = "QUERY_STRING";

/// Level as written in the config: a name (`"debug"`) or a raw integer (`150`).
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum LevelSetting {
    Value(i32),
    Name(String),
}

impl std::fmt::Display for LevelSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::Name(n) => f.write_str(n),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggerSection {
    /// Append target for log lines
    pub file: PathBuf,
    /// Initial threshold; absent means info
    #[serde(default)]
    pub level: Option<LevelSetting>,
    /// Fixed source label; when absent the ambient context is used
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ContextSection {
    /// Environment variable consulted for the ambient context.
    /// An empty string disables the lookup.
    pub env_var: String,
}

impl Default for ContextSection {
    fn default() -> Self {
        Self {
            env_var: DEFAULT_CONTEXT_VAR.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub logger: LoggerSection,
    #[serde(default)]
    pub context: ContextSection,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Read and parse a config file. Does not validate.
pub fn load_file(path: &Path) -> eyre::Result<Config> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("read config {:?}: {}", path, e))?;
    load_toml(&text).map_err(|e| eyre::eyre!("parse config {:?}: {}", path, e))
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Logger
        if self.logger.file.as_os_str().is_empty() {
            eyre::bail!("logger.file must not be empty");
        }
        if let Some(LevelSetting::Name(name)) = &self.logger.level
            && name.trim().is_empty()
        {
            eyre::bail!("logger.level must not be an empty name");
        }
        if let Some(src) = &self.logger.source
            && src.contains(['\n', '\r'])
        {
            eyre::bail!("logger.source must be a single line");
        }

        // Context
        if self.context.env_var.contains(['=', '\0']) {
            eyre::bail!("context.env_var must not contain '=' or NUL");
        }

        Ok(())
    }

    /// Ambient variable name, or `None` when the lookup is disabled.
    pub fn context_var(&self) -> Option<&str> {
        let v = self.context.env_var.as_str();
        (!v.is_empty()).then_some(v)
    }
}
