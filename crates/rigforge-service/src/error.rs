//! Error taxonomy surfaced by the service layer.
//!
//! Five distinct categories, never downgraded into one another:
//!
//! ```text
//! ValidationError ──────────► ServiceError::Validation
//! missing referenced record ► ServiceError::Referential
//! AccessError ──────────────► ServiceError::Authorization
//! DbError::NotFound ────────► ServiceError::NotFound
//! any other DbError ────────► ServiceError::Storage
//! ```

use thiserror::Error;

use rigforge_core::{AccessError, ValidationError};
use rigforge_db::DbError;

/// Errors returned by the RigForge services.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input was malformed or missing (duplicates included).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A referenced record does not exist.
    #[error("{entity} referenced by '{id}' does not exist")]
    Referential { entity: &'static str, id: String },

    /// Requester lacks ownership or the admin capability.
    #[error(transparent)]
    Authorization(#[from] AccessError),

    /// The addressed record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unexpected storage fault.
    #[error("Storage error: {0}")]
    Storage(DbError),
}

impl ServiceError {
    /// Creates a Referential error.
    pub fn referential(entity: &'static str, id: impl Into<String>) -> Self {
        ServiceError::Referential {
            entity,
            id: id.into(),
        }
    }

    /// Creates a NotFound error.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        ServiceError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Storage NotFound keeps its category; duplicate key violations are a
/// validation concern (the caller sent a name/email that is taken); the
/// rest is opaque storage trouble.
impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ServiceError::NotFound { entity, id },
            DbError::UniqueViolation { field, value } => {
                ServiceError::Validation(ValidationError::Duplicate { field, value })
            }
            other => ServiceError::Storage(other),
        }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
