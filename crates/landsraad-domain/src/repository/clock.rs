//! Clock and cycle counter - The two notions of "now"
//!
//! `Clock` is wall time (deadlines, proposal expiry). `CycleRepository`
//! is game time, advanced only when the game master runs a cycle.

use std::sync::Arc;

use crate::model::time::Timestamp;
use crate::repository::error::RepositoryError;

pub trait Clock: Send + Sync + core::fmt::Debug {
    fn now(&self) -> Timestamp;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

pub trait CycleRepository {
    /// The last completed cycle; 0 before the first one
    fn current(&self) -> Result<u64, RepositoryError>;

    /// Move to the next cycle and return its number
    fn advance(&mut self) -> Result<u64, RepositoryError>;
}
