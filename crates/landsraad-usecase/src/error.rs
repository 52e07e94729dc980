//! Service errors - One tagged error for every use case

use landsraad_domain::model::trade::TradeError;
use landsraad_domain::model::vote::VoteError;
use landsraad_domain::repository::error::RepositoryError;
use landsraad_domain::service::settlement::SettlementError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// A version token no longer matched; re-read and retry
    #[error("{entity} {id} was modified concurrently")]
    Conflict { entity: &'static str, id: String },

    #[error("Repository error: {0}")]
    Repository(String),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        ServiceError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Short tag for logs and reports
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::NotFound { .. } => "NOT_FOUND",
            ServiceError::Forbidden(_) => "FORBIDDEN",
            ServiceError::InvalidState(_) => "INVALID_STATE",
            ServiceError::ValidationFailed(_) => "VALIDATION_FAILED",
            ServiceError::Conflict { .. } => "CONFLICT",
            ServiceError::Repository(_) => "REPOSITORY",
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => ServiceError::NotFound { entity, id },
            RepositoryError::ConcurrencyError { entity, id } => ServiceError::Conflict { entity, id },
            RepositoryError::PersistenceError { message } => ServiceError::Repository(message),
        }
    }
}

impl From<TradeError> for ServiceError {
    fn from(err: TradeError) -> Self {
        ServiceError::InvalidState(err.to_string())
    }
}

impl From<VoteError> for ServiceError {
    fn from(err: VoteError) -> Self {
        match err {
            VoteError::NotParticipant { .. } | VoteError::NotInitiator { .. } => {
                ServiceError::Forbidden(err.to_string())
            }
            VoteError::NotPending { .. } | VoteError::DeadlinePassed => {
                ServiceError::InvalidState(err.to_string())
            }
        }
    }
}

impl From<SettlementError> for ServiceError {
    fn from(err: SettlementError) -> Self {
        ServiceError::ValidationFailed(err.to_string())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
