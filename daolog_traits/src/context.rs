//! Ambient "current request" context lookup.
//!
//! A web server typically exposes the request's query string to the handling
//! process; the logger uses it to tag lines when no explicit source is set.
//! Every implementation must fail soft: an unavailable context is `None`,
//! never an error.

/// Conventional CGI variable carrying the request's query string.
pub const QUERY_STRING: &str = "QUERY_STRING";

/// Capability returning the ambient context label, if any.
pub trait ContextSource {
    fn current(&self) -> Option<String>;
}

impl<F> ContextSource for F
where
    F: Fn() -> Option<String>,
{
    #[inline]
    fn current(&self) -> Option<String> {
        self()
    }
}

/// No ambient context; source resolution falls through to `""`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoContext;

impl ContextSource for NoContext {
    #[inline]
    fn current(&self) -> Option<String> {
        None
    }
}

/// Reads the context from an environment variable on every lookup.
///
/// Unset, empty, or non-unicode values yield `None`.
#[derive(Debug, Clone)]
pub struct EnvContext {
    var: String,
}

impl EnvContext {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    /// Context from `QUERY_STRING`.
    pub fn query_string() -> Self {
        Self::new(QUERY_STRING)
    }

    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvContext {
    fn default() -> Self {
        Self::query_string()
    }
}

impl ContextSource for EnvContext {
    fn current(&self) -> Option<String> {
        if self.var.is_empty() || self.var.contains(['=', '\0']) {
            return None;
        }
        std::env::var(&self.var).ok().filter(|v| !v.is_empty())
    }
}
