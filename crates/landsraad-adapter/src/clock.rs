//! Clock adapters

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use landsraad_domain::model::time::Timestamp;
use landsraad_domain::repository::clock::Clock;

/// Wall clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_millis(Utc::now().timestamp_millis())
    }
}

/// Hand-driven clock for tests and scripted sessions.
///
/// Clones share the same instant.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn at(timestamp: Timestamp) -> Self {
        Self {
            millis: Arc::new(AtomicI64::new(timestamp.as_millis())),
        }
    }

    pub fn advance_millis(&self, millis: i64) {
        self.millis.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_millis(self.millis.load(Ordering::SeqCst))
    }
}

/// RFC 3339 rendering, e.g. for logs and exported snapshots
pub fn format_timestamp(timestamp: Timestamp) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp.as_millis())
        .map(|at| at.to_rfc3339())
        .unwrap_or_else(|| timestamp.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_shared() {
        let clock = ManualClock::at(Timestamp::from_millis(1_000));
        let other = clock.clone();
        other.advance_millis(500);
        assert_eq!(clock.now(), Timestamp::from_millis(1_500));
    }

    #[test]
    fn test_rfc3339_rendering() {
        let at = Timestamp::from_millis(1_772_366_400_000);
        assert_eq!(format_timestamp(at), "2026-03-01T12:00:00+00:00");
    }
}
