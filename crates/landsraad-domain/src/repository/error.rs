//! Errors shared by every repository port

/// Errors that can occur during repository operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No record with this id
    NotFound { entity: &'static str, id: String },
    /// Failed to persist
    PersistenceError { message: String },
    /// The record changed since it was read
    ConcurrencyError { entity: &'static str, id: String },
}

impl RepositoryError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        RepositoryError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn stale(entity: &'static str, id: impl ToString) -> Self {
        RepositoryError::ConcurrencyError {
            entity,
            id: id.to_string(),
        }
    }
}

impl core::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RepositoryError::NotFound { entity, id } => {
                write!(f, "{} not found: {}", entity, id)
            }
            RepositoryError::PersistenceError { message } => {
                write!(f, "Persistence error: {}", message)
            }
            RepositoryError::ConcurrencyError { entity, id } => {
                write!(f, "Concurrent modification for {}: {}", entity, id)
            }
        }
    }
}

impl std::error::Error for RepositoryError {}
