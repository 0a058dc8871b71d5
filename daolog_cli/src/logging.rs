//! Diagnostics for the CLI itself (not the DAO log file).
//!
//! Writes to stderr, pretty or JSON, filtered by `RUST_LOG` or `--log-level`.
//! With `--diag-file`, the same events also go to that file through a
//! non-blocking appender. The returned guard must be dropped before the
//! process exits or buffered lines are lost.

use std::path::Path;

use eyre::WrapErr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init(level: &str, json: bool, diag_file: Option<&Path>) -> eyre::Result<Option<WorkerGuard>> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => EnvFilter::try_new(level)
            .wrap_err_with(|| format!("invalid --log-level {level:?}"))?,
    };

    let mut guard = None;
    let file_layer = match diag_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| eyre::eyre!("--diag-file {:?} has no usable file name", path))?;
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(name)
                .build(dir)
                .wrap_err_with(|| format!("cannot open diagnostics file {}", path.display()))?;
            let (writer, g) = tracing_appender::non_blocking(appender);
            guard = Some(g);
            Some(fmt::layer().with_writer(writer).with_ansi(false))
        }
        None => None,
    };

    let (json_layer, text_layer) = if json {
        (Some(fmt::layer().json().with_writer(std::io::stderr)), None)
    } else {
        (
            None,
            Some(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .compact(),
            ),
        )
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .wrap_err("failed to initialize tracing subscriber")?;

    Ok(guard)
}
