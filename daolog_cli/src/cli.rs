//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use daolog_core::Level;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "daolog", version, about = "Append leveled lines to a DAO log file")]
pub struct Cli {
    /// Path to config TOML; flags below override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log file to append to
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Threshold: emergency|critical|info|diagnostic|debug or an integer
    #[arg(long, value_name = "LEVEL", value_parser = parse_level, allow_hyphen_values = true)]
    pub level: Option<Level>,

    /// Fixed source label placed between angle brackets
    #[arg(long, value_name = "TEXT")]
    pub source: Option<String>,

    /// Environment variable holding the ambient context (empty disables)
    #[arg(long, value_name = "VAR")]
    pub context_var: Option<String>,

    /// Print results and errors as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Diagnostics level for this tool's own output (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Also write this tool's diagnostics to a file
    #[arg(long, value_name = "FILE")]
    pub diag_file: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log a (DBG) line at debug level
    Debug {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Log an (IFO) line at info level
    Info {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Log an (ERR) line at critical level
    Error {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Log a (DIE) line at critical level
    Fatal {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Append the message verbatim, without tag, timestamp or newline
    Raw {
        message: String,
        /// Level the message is gated at
        #[arg(long, value_name = "LEVEL", value_parser = parse_level, allow_hyphen_values = true, default_value = "info")]
        at: Level,
    },
    /// Print the resolved file, threshold and source without writing
    Check,
}

fn parse_level(s: &str) -> Result<Level, String> {
    s.parse::<Level>().map_err(|e| e.to_string())
}
