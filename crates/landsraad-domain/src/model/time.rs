//! Timestamp - Wall-clock instants as the domain sees them
//!
//! Milliseconds since the Unix epoch. Formatting and the actual clock live
//! in the adapter layer; the domain only compares and orders instants.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn as_millis(&self) -> i64 {
        self.0
    }

    /// Returns a timestamp `millis` later than this one
    pub fn plus_millis(&self, millis: i64) -> Self {
        Self(self.0.saturating_add(millis))
    }

    /// True when `self` lies strictly after `other`
    pub fn is_after(&self, other: Timestamp) -> bool {
        self.0 > other.0
    }
}

impl core::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}
