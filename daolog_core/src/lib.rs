#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Level-gated file logger for a generated data-access layer.
//!
//! ## Architecture
//!
//! - **Levels**: inverted numeric scale, larger = more verbose (`level` module)
//! - **Logger**: per-call open/append/close against one file path (`logger` module)
//! - **Errors**: `LoggerError` for failed writes, `DaoError` for data-access
//!   failures carrying an error descriptor and affected-row count (`error` module)
//! - **Configuration**: resolved runtime config built from `daolog_config` (`config` module)
//!
//! ## Gate
//!
//! A call at level `L` is written iff `L >= threshold`. With the default
//! `INFO` threshold, debug, diagnostic and info calls are written while error
//! and fatal calls (both `CRITICAL`, -100) are suppressed; they pass only once
//! the threshold is at or below `CRITICAL`. Raising the threshold to `DEBUG`
//! leaves only debug calls.

pub mod config;
pub mod error;
pub mod level;
pub mod logger;

pub use config::LoggerCfg;
pub use error::{BuildError, DaoError, LoggerError, Result};
pub use level::{Level, ParseLevelError, Tag};
pub use logger::{CREATED_MESSAGE, Logger, LoggerBuilder, format_line};
