//! # Validation Module
//!
//! Input validation utilities for rigforge.
//!
//! ## Validation Strategy
//! ```text
//! Layer 1: Transport (out of scope here)
//! ├── Shape/type validation (deserialization)
//! └── Immediate caller feedback
//!          │
//!          ▼
//! Layer 2: THIS MODULE - business rule validation
//!          │
//!          ▼
//! Layer 3: Database (SQLite)
//! ├── NOT NULL / CHECK constraints
//! ├── UNIQUE constraints
//! └── Foreign key constraints
//!
//! Defense in depth: multiple layers catch different errors.
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (category, partner, component title, build name).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// Same shape check the upstream records were created under:
/// `local@domain.tld` with no whitespace. Deliverability is not our problem.
///
/// ## Returns
/// The trimmed, lowercased address.
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = email.trim().to_lowercase();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let malformed = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "must look like local@domain.tld".to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(malformed());
    }

    let (local, domain) = email.split_once('@').ok_or_else(malformed)?;
    if local.is_empty() || domain.is_empty() || !domain.contains('.') || domain.ends_with('.') {
        return Err(malformed());
    }

    Ok(email)
}

/// Validates a partner website URL.
///
/// ## Rules
/// Must match `http://...` or `https://...` with a non-empty remainder.
pub fn validate_website(url: &str) -> ValidationResult<()> {
    let url = url.trim();

    if url.is_empty() {
        return Err(ValidationError::Required {
            field: "website".to_string(),
        });
    }

    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));

    match rest {
        Some(r) if !r.is_empty() => Ok(()),
        _ => Err(ValidationError::InvalidFormat {
            field: "website".to_string(),
            reason: "must start with http:// or https://".to_string(),
        }),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (bundled/free items)
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a commission rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_commission_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "commission_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
pub fn validate_uuid(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Carte graphique (GPU)").is_ok());
        assert!(validate_name("name", "").is_err());
        assert!(validate_name("name", "   ").is_err());
        assert!(validate_name("name", &"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert_eq!(
            validate_email("User@Example.com").unwrap(),
            "user@example.com"
        );
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("a @b.com").is_err());
        assert!(validate_email("a@b.").is_err());
    }

    #[test]
    fn test_validate_website() {
        assert!(validate_website("https://www.ldlc.com").is_ok());
        assert!(validate_website("http://example.org").is_ok());
        assert!(validate_website("ftp://example.org").is_err());
        assert!(validate_website("www.ldlc.com").is_err());
        assert!(validate_website("https://").is_err());
        assert!(validate_website("").is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(59999).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_commission_rate_bps() {
        assert!(validate_commission_rate_bps(0).is_ok());
        assert!(validate_commission_rate_bps(500).is_ok());
        assert!(validate_commission_rate_bps(10000).is_ok());
        assert!(validate_commission_rate_bps(10001).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("id", "550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("id", "").is_err());
        assert!(validate_uuid("id", "not-a-uuid").is_err());
    }
}
