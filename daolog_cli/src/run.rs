//! Config resolution and command execution.

use daolog_config::DEFAULT_CONTEXT_VAR;
use daolog_core::{Level, Logger, LoggerCfg, Tag};
use eyre::{Result, WrapErr};
use serde_json::json;

use crate::cli::{Cli, Commands};

/// What a command did, for reporting on stdout.
#[derive(Debug)]
pub enum Outcome {
    Written { level: Level, threshold: Level },
    Suppressed { level: Level, threshold: Level },
    Checked { cfg: LoggerCfg, source: String },
}

impl Outcome {
    pub fn render(&self, json: bool) -> String {
        match (self, json) {
            (Self::Written { level, threshold }, true) => json!({
                "written": true,
                "level": level.value(),
                "threshold": threshold.value(),
            })
            .to_string(),
            (Self::Suppressed { level, threshold }, true) => json!({
                "written": false,
                "level": level.value(),
                "threshold": threshold.value(),
            })
            .to_string(),
            (Self::Checked { cfg, source }, true) => json!({
                "file": cfg.file.display().to_string(),
                "level": cfg.level.value(),
                "source": source,
                "context_var": cfg.context_var,
            })
            .to_string(),
            (Self::Written { level, .. }, false) => format!("written at {level}"),
            (Self::Suppressed { level, threshold }, false) => {
                format!("suppressed: level {level} is below threshold {threshold}")
            }
            (Self::Checked { cfg, source }, false) => format!(
                "file: {}\nlevel: {}\nsource: <{}>",
                cfg.file.display(),
                cfg.level,
                source
            ),
        }
    }
}

/// Merge the optional config file with command-line overrides.
pub fn resolve_cfg(cli: &Cli) -> Result<LoggerCfg> {
    let mut cfg = match &cli.config {
        Some(path) => {
            let file_cfg = daolog_config::load_file(path).wrap_err("invalid configuration")?;
            file_cfg.validate().wrap_err("invalid configuration")?;
            LoggerCfg::try_from(&file_cfg).wrap_err("invalid configuration")?
        }
        None => {
            let Some(file) = &cli.file else {
                eyre::bail!("invalid configuration: no log file given (use --file or --config)");
            };
            let mut cfg = LoggerCfg::new(file);
            cfg.context_var = Some(DEFAULT_CONTEXT_VAR.to_string());
            cfg
        }
    };

    if let Some(file) = &cli.file {
        cfg.file.clone_from(file);
    }
    if let Some(level) = cli.level {
        cfg.level = level;
    }
    if let Some(source) = &cli.source {
        cfg.source = Some(source.clone()).filter(|s| !s.is_empty());
    }
    if let Some(var) = &cli.context_var {
        cfg.context_var = Some(var.clone()).filter(|v| !v.is_empty());
    }
    Ok(cfg)
}

pub fn run(cli: &Cli) -> Result<Outcome> {
    let cfg = resolve_cfg(cli)?;
    tracing::debug!(
        file = %cfg.file.display(),
        threshold = cfg.level.value(),
        "resolved logger config"
    );

    let (tag, words) = match &cli.cmd {
        Commands::Check => {
            let source = cfg.log_source();
            return Ok(Outcome::Checked { cfg, source });
        }
        Commands::Raw { message, at } => {
            let logger = Logger::from_config(&cfg)?;
            let written = logger.log(message, *at)?;
            return Ok(report(*at, logger.log_level(), written));
        }
        Commands::Debug { message } => (Tag::Debug, message),
        Commands::Info { message } => (Tag::Info, message),
        Commands::Error { message } => (Tag::Error, message),
        Commands::Fatal { message } => (Tag::Fatal, message),
    };

    let logger = Logger::from_config(&cfg)?;
    let level = tag.default_level();
    let written = logger.log_tagged(tag, &words.join(" "), level)?;
    Ok(report(level, logger.log_level(), written))
}

fn report(level: Level, threshold: Level, written: bool) -> Outcome {
    if written {
        tracing::info!(level = level.value(), "line appended");
        Outcome::Written { level, threshold }
    } else {
        tracing::info!(level = level.value(), threshold = threshold.value(), "line suppressed");
        Outcome::Suppressed { level, threshold }
    }
}
