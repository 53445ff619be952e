//! # Error Types
//!
//! Domain-specific error types for rigforge-core.
//!
//! ## Error Hierarchy
//! ```text
//! rigforge-core errors (this file)
//! ├── ValidationError  - Input validation failures
//! └── AccessError      - Authorization gate denials
//!
//! rigforge-db errors (separate crate)
//! └── DbError          - Database operation failures
//!
//! rigforge-service errors
//! └── ServiceError     - What callers see (validation / referential /
//!                        authorization / not-found / storage)
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, id, ...)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when submitted data does not meet requirements, before any
/// business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed email or URL).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate category name or user email).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// A collection that must not be empty is empty.
    #[error("{field} must contain at least one entry")]
    Empty { field: String },
}

// =============================================================================
// Access Error
// =============================================================================

/// Authorization gate denials.
///
/// Two independent gates exist (see [`crate::access`]): a hard admin
/// requirement and a per-resource ownership-or-admin check. They carry
/// distinct variants so call sites cannot conflate them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    /// The operation requires the admin capability.
    #[error("admin capability required")]
    AdminRequired,

    /// The requester is neither the resource owner nor an admin.
    #[error("requester {requester_id} does not own this resource")]
    NotOwner { requester_id: String },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::Empty {
            field: "components".to_string(),
        };
        assert_eq!(err.to_string(), "components must contain at least one entry");
    }

    #[test]
    fn test_access_error_messages() {
        assert_eq!(
            AccessError::AdminRequired.to_string(),
            "admin capability required"
        );
        let err = AccessError::NotOwner {
            requester_id: "u1".to_string(),
        };
        assert_eq!(err.to_string(), "requester u1 does not own this resource");
    }
}
