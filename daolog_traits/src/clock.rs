use chrono::{DateTime, FixedOffset, Local};

/// Wall-clock abstraction used to timestamp log lines.
///
/// - now(): current date-time carrying its UTC offset
/// - timestamp(): `now()` rendered as ISO-8601 with seconds precision
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;

    /// ISO-8601 / RFC 3339 rendering, e.g. `2011-06-01T12:30:00+02:00`.
    fn timestamp(&self) -> String {
        self.now()
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, false)
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    #[inline]
    fn now(&self) -> DateTime<FixedOffset> {
        (**self).now()
    }
}

/// Default clock backed by the local system time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Deterministic clock for tests; enabled by the `test-util` feature.
#[cfg(any(test, feature = "test-util"))]
pub mod test_clock {
    use super::*;
    use chrono::TimeDelta;
    use std::sync::{Arc, Mutex};

    /// Deterministic clock whose time only moves when told to.
    ///
    /// Clones share the same instant, so a test can keep one handle and hand
    /// another to the logger.
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        at: Arc<Mutex<DateTime<FixedOffset>>>,
    }

    impl FixedClock {
        pub fn new(at: DateTime<FixedOffset>) -> Self {
            Self {
                at: Arc::new(Mutex::new(at)),
            }
        }

        /// Parse an RFC 3339 string; falls back to the Unix epoch (UTC) on bad input.
        pub fn at(rfc3339: &str) -> Self {
            let at = DateTime::parse_from_rfc3339(rfc3339).unwrap_or_default();
            Self::new(at)
        }

        /// Move the clock forward by the given delta.
        pub fn advance(&self, d: TimeDelta) {
            if let Ok(mut at) = self.at.lock() {
                *at += d;
            }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<FixedOffset> {
            self.at.lock().map(|g| *g).unwrap_or_default()
        }
    }

}
