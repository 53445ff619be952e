//! # User Repository
//!
//! Database operations for user accounts.
//!
//! Each user row carries `configuration_ids`, a JSON array of the
//! configurations the user owns. The configuration repository maintains it
//! in the same transaction as configuration inserts and deletes; nothing
//! here touches it beyond whole-row reads and writes.

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use rigforge_core::{Role, User};

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    password_hash: String,
    role: Role,
    configuration_ids: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DbError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let configuration_ids: Vec<String> = serde_json::from_str(&row.configuration_ids)?;

        Ok(User {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            role: row.role,
            configuration_ids,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str =
    "id, name, email, password_hash, role, configuration_ids, created_at, updated_at";

/// Listing filter for users.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Case-insensitive substring over name or email.
    pub search: Option<String>,

    /// Restrict to one role.
    pub role: Option<Role>,
}

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a user.
    pub async fn insert(&self, user: &User) -> DbResult<()> {
        debug!(id = %user.id, email = %user.email, "Inserting user");

        let configuration_ids = serde_json::to_string(&user.configuration_ids)?;

        sqlx::query(
            r#"
            INSERT INTO users (
                id, name, email, password_hash, role, configuration_ids,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(configuration_ids)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_duplicate_value(".email", &user.email))?;

        Ok(())
    }

    /// Gets a user by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {SELECT_COLUMNS} FROM users WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(User::try_from).transpose()
    }

    /// Gets a user by email (stored lowercase).
    pub async fn get_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM users WHERE email = ?1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    /// Lists users matching a filter, newest first.
    pub async fn list(&self, filter: &UserFilter, limit: u32, offset: u32) -> DbResult<Vec<User>> {
        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {SELECT_COLUMNS} FROM users WHERE 1 = 1"));

        if let Some(search) = &filter.search {
            let pattern = format!("%{}%", search);
            qb.push(" AND (name LIKE ")
                .push_bind(pattern.clone())
                .push(" OR email LIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(role) = filter.role {
            qb.push(" AND role = ").push_bind(role);
        }

        qb.push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let rows: Vec<UserRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter().map(User::try_from).collect()
    }

    /// Updates a user row in full.
    pub async fn update(&self, user: &User) -> DbResult<()> {
        debug!(id = %user.id, "Updating user");

        let configuration_ids = serde_json::to_string(&user.configuration_ids)?;

        let result = sqlx::query(
            r#"
            UPDATE users SET
                name = ?2,
                email = ?3,
                password_hash = ?4,
                role = ?5,
                configuration_ids = ?6,
                updated_at = ?7
            WHERE id = ?1
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(configuration_ids)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_duplicate_value(".email", &user.email))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", &user.id));
        }

        Ok(())
    }

    /// Deletes a user.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting user");

        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::generate_id;

    fn user(name: &str, email: &str, role: Role) -> User {
        let now = Utc::now();
        User {
            id: generate_id(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role,
            configuration_ids: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_by_email() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.users();

        let alice = user("Alice", "alice@example.com", Role::User);
        repo.insert(&alice).await.unwrap();

        let fetched = repo.get_by_email("alice@example.com").await.unwrap().unwrap();
        assert_eq!(fetched.id, alice.id);
        assert_eq!(fetched.role, Role::User);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.users();

        repo.insert(&user("Alice", "alice@example.com", Role::User))
            .await
            .unwrap();
        let err = repo
            .insert(&user("Other", "alice@example.com", Role::User))
            .await
            .unwrap_err();
        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "users.email");
                assert_eq!(value, "alice@example.com");
            }
            other => panic!("expected UniqueViolation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_search_and_role_filter() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.users();

        repo.insert(&user("Alice", "alice@example.com", Role::User))
            .await
            .unwrap();
        repo.insert(&user("Admin", "admin@example.com", Role::Admin))
            .await
            .unwrap();

        let admins = repo
            .list(
                &UserFilter {
                    role: Some(Role::Admin),
                    ..Default::default()
                },
                20,
                0,
            )
            .await
            .unwrap();
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].name, "Admin");

        let by_email = repo
            .list(
                &UserFilter {
                    search: Some("alice@".to_string()),
                    ..Default::default()
                },
                20,
                0,
            )
            .await
            .unwrap();
        assert_eq!(by_email.len(), 1);
    }
}
