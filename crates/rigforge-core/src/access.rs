//! # Access Control Guard
//!
//! Pure authorization gates consumed by the service layer.
//!
//! ## Two gates, kept separate
//! ```text
//! require_admin(requester)                 Hard gate. Catalog mutation,
//!                                          user administration, list-all.
//!
//! require_owner_or_admin(requester, owner) Soft, per-resource gate.
//!                                          Configuration get/update/delete.
//! ```
//! The two rules have different semantics and different failure variants;
//! they are deliberately not merged into one overloaded check.
//!
//! Both gates are deterministic, side-effect free, and must be evaluated on
//! every mutating or single-resource-read operation touching a
//! Configuration or a User record. The requester identity itself comes from
//! the external auth collaborator; this crate never inspects credentials.

use serde::{Deserialize, Serialize};

use crate::error::AccessError;
use crate::types::Role;

/// The authenticated identity attached to a request.
///
/// Supplied by the auth collaborator at the boundary; the core trusts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    pub id: String,
    pub role: Role,
}

impl Requester {
    /// Convenience constructor.
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Requester {
            id: id.into(),
            role,
        }
    }
}

/// Hard gate: the operation is admin-only.
pub fn require_admin(requester: &Requester) -> Result<(), AccessError> {
    if requester.role.is_admin() {
        Ok(())
    } else {
        Err(AccessError::AdminRequired)
    }
}

/// Soft gate: allow iff the requester owns the resource or is an admin.
pub fn require_owner_or_admin(requester: &Requester, owner_id: &str) -> Result<(), AccessError> {
    if requester.id == owner_id || requester.role.is_admin() {
        Ok(())
    } else {
        Err(AccessError::NotOwner {
            requester_id: requester.id.clone(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> Requester {
        Requester::new(id, Role::User)
    }

    fn admin(id: &str) -> Requester {
        Requester::new(id, Role::Admin)
    }

    #[test]
    fn test_require_admin() {
        assert!(require_admin(&admin("a1")).is_ok());
        assert_eq!(
            require_admin(&user("u1")),
            Err(AccessError::AdminRequired)
        );
    }

    #[test]
    fn test_owner_passes_ownership_gate() {
        assert!(require_owner_or_admin(&user("u1"), "u1").is_ok());
    }

    #[test]
    fn test_non_owner_is_denied() {
        let err = require_owner_or_admin(&user("u1"), "u2").unwrap_err();
        assert_eq!(
            err,
            AccessError::NotOwner {
                requester_id: "u1".to_string()
            }
        );
    }

    #[test]
    fn test_admin_passes_ownership_gate_for_any_owner() {
        assert!(require_owner_or_admin(&admin("a1"), "u2").is_ok());
    }

    #[test]
    fn test_gates_stay_independent() {
        // Owning a resource never grants the admin capability.
        let owner = user("u1");
        assert!(require_owner_or_admin(&owner, "u1").is_ok());
        assert!(require_admin(&owner).is_err());
    }
}
