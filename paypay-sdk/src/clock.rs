//! Time source for request timestamps and generated request numbers.
//!
//! Operations never read the wall clock directly; the client holds a
//! [`Clock`] so tests and replays can pin time.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Current UTC time.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a single instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Freeze the clock at `instant`.
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Freeze the clock at a Unix timestamp in milliseconds.
    ///
    /// Out-of-range values fall back to the Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Self(Utc.timestamp_millis_opt(millis).single().unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Format a timestamp the way the gateway expects: RFC 3339, UTC,
/// millisecond precision, `Z` suffix (e.g. `2024-01-01T00:00:00.000Z`).
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Build a request number of the form `{prefix}_{unix_millis}`.
pub fn generate_request_no(prefix: &str, clock: &dyn Clock) -> String {
    format!("{}_{}", prefix, clock.now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_format() {
        let clock = FixedClock::from_millis(1_704_067_200_000);
        assert_eq!(format_timestamp(clock.now()), "2024-01-01T00:00:00.000Z");

        let clock = FixedClock::from_millis(1_704_067_200_123);
        assert_eq!(format_timestamp(clock.now()), "2024-01-01T00:00:00.123Z");
    }

    #[test]
    fn test_generated_request_no() {
        let clock = FixedClock::from_millis(1_704_067_200_000);
        assert_eq!(generate_request_no("query", &clock), "query_1704067200000");
        assert_eq!(generate_request_no("close", &clock), "close_1704067200000");
    }

    #[test]
    fn test_system_clock_advances() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
