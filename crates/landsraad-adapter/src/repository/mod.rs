//! Persistence Adapters - Repository implementations
//!
//! These implement the repository traits from landsraad-domain.

pub mod event_log;
pub mod in_memory;
pub mod roster;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use landsraad_domain::repository::error::RepositoryError;

/// Fresh record id
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub(crate) fn read_lock<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, RepositoryError> {
    lock.read().map_err(|_| RepositoryError::PersistenceError {
        message: "Failed to acquire read lock".to_string(),
    })
}

pub(crate) fn write_lock<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, RepositoryError> {
    lock.write().map_err(|_| RepositoryError::PersistenceError {
        message: "Failed to acquire write lock".to_string(),
    })
}
