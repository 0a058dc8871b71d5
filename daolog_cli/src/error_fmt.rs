//! Human-readable error descriptions and structured JSON error formatting.

use daolog_core::{BuildError, LoggerError};
use serde_json::json;

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(le) = err.downcast_ref::<LoggerError>() {
        let path = le.path().display();
        return match le {
            LoggerError::Open { source, .. } => format!(
                "What happened: Could not open the log file for writing ({path}: {source}).\nLikely causes: The parent directory does not exist, the path is a directory, or the process lacks write permission.\nHow to fix: Create the directory or point --file / logger.file at a writable location."
            ),
            LoggerError::Write { source, .. } => format!(
                "What happened: The log file was opened but the line could not be written ({path}: {source}).\nLikely causes: Disk full or the file system went read-only.\nHow to fix: Free space or remount, then rerun."
            ),
        };
    }

    if let Some(BuildError::Level(e)) = err.downcast_ref::<BuildError>() {
        return format!(
            "What happened: Invalid configuration ({e}).\nLikely causes: A misspelled level name in logger.level.\nHow to fix: Use emergency, critical, info, diagnostic, debug, or an integer."
        );
    }

    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("invalid configuration") {
        let cause = err
            .chain()
            .skip(1)
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(": ");
        let detail = if cause.is_empty() { msg.clone() } else { cause };
        return format!(
            "What happened: Invalid configuration ({detail}).\nLikely causes: Missing [logger] section, empty logger.file, or no --file given.\nHow to fix: Edit the TOML config or pass --file, then rerun."
        );
    }

    if lower.starts_with("cannot open diagnostics file") {
        let cause = err.source().map(|s| format!(" ({s})")).unwrap_or_default();
        return format!(
            "What happened: {msg}{cause}.\nLikely causes: A parent of the --diag-file path is a regular file or is not writable.\nHow to fix: Point --diag-file at a writable location, or drop it."
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit codes: config 2, open failure 3, write failure 4, anything else 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if let Some(le) = err.downcast_ref::<LoggerError>() {
        return match le {
            LoggerError::Open { .. } => 3,
            LoggerError::Write { .. } => 4,
        };
    }
    if err.downcast_ref::<BuildError>().is_some()
        || err.to_string().starts_with("invalid configuration")
    {
        return 2;
    }
    1
}

fn reason_name(err: &eyre::Report) -> &'static str {
    match exit_code_for_error(err) {
        2 => "Config",
        3 => "OpenFailure",
        4 => "WriteFailure",
        _ => "Error",
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    let msg = humanize(err);
    match err.downcast_ref::<LoggerError>() {
        Some(le) => json!({
            "reason": reason_name(err),
            "path": le.path().display().to_string(),
            "message": msg,
        })
        .to_string(),
        None => json!({ "reason": reason_name(err), "message": msg }).to_string(),
    }
}
