//! User administration.
//!
//! Admin-gated account management: listing with search, profile updates
//! (name, email, role) and deletion. Deleting a user removes all of their
//! configurations first, so no orphaned rows remain.

use chrono::Utc;
use tracing::{debug, info};

use rigforge_core::{access, validation, Requester, Role, User};
use rigforge_db::{Database, UserFilter};

use crate::error::{ServiceError, ServiceResult};

/// Partial update for a user record. Password changes go through the
/// external Auth collaborator, not here.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

/// Service managing user accounts.
#[derive(Debug, Clone)]
pub struct UserService {
    db: Database,
}

impl UserService {
    /// Create a new user service.
    pub fn new(db: Database) -> Self {
        UserService { db }
    }

    /// Lists users, newest first; admin only.
    pub async fn list(
        &self,
        requester: &Requester,
        filter: &UserFilter,
        limit: u32,
        offset: u32,
    ) -> ServiceResult<Vec<User>> {
        access::require_admin(requester)?;
        Ok(self.db.users().list(filter, limit, offset).await?)
    }

    /// Gets a user by id; admin only.
    pub async fn get(&self, requester: &Requester, id: &str) -> ServiceResult<User> {
        access::require_admin(requester)?;
        self.db
            .users()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))
    }

    /// Updates name, email and/or role; admin only. Emails are validated
    /// and stored lowercase.
    pub async fn update(
        &self,
        requester: &Requester,
        id: &str,
        changes: UserChanges,
    ) -> ServiceResult<User> {
        access::require_admin(requester)?;
        let mut user = self
            .db
            .users()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))?;

        if let Some(name) = changes.name {
            validation::validate_name("name", &name)?;
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = validation::validate_email(&email)?;
        }
        if let Some(role) = changes.role {
            user.role = role;
        }

        user.updated_at = Utc::now();
        self.db.users().update(&user).await?;

        debug!(id = %user.id, "User updated");
        Ok(user)
    }

    /// Deletes a user and all of their configurations; admin only.
    pub async fn delete(&self, requester: &Requester, id: &str) -> ServiceResult<()> {
        access::require_admin(requester)?;

        // Resolve first so a missing user is NotFound, not a silent no-op.
        let user = self
            .db
            .users()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))?;

        let removed = self.db.configurations().delete_for_user(&user.id).await?;
        self.db.users().delete(&user.id).await?;

        info!(id = %user.id, configurations_removed = removed, "User deleted");
        Ok(())
    }
}
