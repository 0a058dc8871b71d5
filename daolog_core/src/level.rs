//! Numeric log levels and line tags.
//!
//! Levels use an inverted scale: larger values are *more verbose*. A call at
//! level `L` passes a threshold `T` iff `L >= T`, so a threshold of
//! [`Level::DEBUG`] lets only debug-valued calls through while
//! [`Level::EMERGENCY`] lets everything through.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A log level or threshold. Any `i32` is valid; the named constants are
/// the conventional stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(i32);

impl Level {
    pub const EMERGENCY: Level = Level(-200);
    pub const CRITICAL: Level = Level(-100);
    pub const INFO: Level = Level(0);
    pub const DIAGNOSTIC: Level = Level(100);
    pub const DEBUG: Level = Level(200);

    /// Named levels, most severe first.
    pub const NAMED: [Level; 5] = [
        Self::EMERGENCY,
        Self::CRITICAL,
        Self::INFO,
        Self::DIAGNOSTIC,
        Self::DEBUG,
    ];

    #[inline]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Gate rule: does a call at `self` get written under `threshold`?
    #[inline]
    pub const fn passes(self, threshold: Level) -> bool {
        self.0 >= threshold.0
    }

    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            -200 => Some("emergency"),
            -100 => Some("critical"),
            0 => Some("info"),
            100 => Some("diagnostic"),
            200 => Some("debug"),
            _ => None,
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::INFO
    }
}

impl From<i32> for Level {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<Level> for i32 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.0),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown log level {0:?} (expected emergency|critical|info|diagnostic|debug or an integer)")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if let Ok(v) = t.parse::<i32>() {
            return Ok(Self(v));
        }
        match t.to_ascii_lowercase().as_str() {
            "emergency" | "emerg" => Ok(Self::EMERGENCY),
            "critical" | "crit" => Ok(Self::CRITICAL),
            "info" => Ok(Self::INFO),
            "diagnostic" | "diag" => Ok(Self::DIAGNOSTIC),
            "debug" => Ok(Self::DEBUG),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// Three-letter tag opening each formatted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Debug,
    Info,
    Error,
    Fatal,
}

impl Tag {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DBG",
            Self::Info => "IFO",
            Self::Error => "ERR",
            Self::Fatal => "DIE",
        }
    }

    /// Level a tagged call is gated at when none is given.
    ///
    /// `Fatal` shares `CRITICAL` with `Error` rather than using `EMERGENCY`.
    pub const fn default_level(self) -> Level {
        match self {
            Self::Debug => Level::DEBUG,
            Self::Info => Level::INFO,
            Self::Error | Self::Fatal => Level::CRITICAL,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
