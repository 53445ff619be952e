//! # Configuration Repository
//!
//! Database operations for saved build configurations.
//!
//! Line items (`components`) and tags are JSON TEXT columns; a configuration
//! row is one whole aggregate. The stored `total_cost_cents` is always the
//! value the pricing engine computed from the line items at write time.
//!
//! The owner's `configuration_ids` back-reference list changes in the same
//! transaction as the configuration row itself (insert appends, delete
//! removes), so the two sides can never diverge — not under concurrent
//! creates by the same owner, and not when a statement fails midway.

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use rigforge_core::{Configuration, LineItem};

#[derive(sqlx::FromRow)]
struct ConfigurationRow {
    id: String,
    user_id: String,
    name: String,
    description: Option<String>,
    components: String,
    total_cost_cents: i64,
    is_public: bool,
    tags: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ConfigurationRow> for Configuration {
    type Error = DbError;

    fn try_from(row: ConfigurationRow) -> Result<Self, Self::Error> {
        let components: Vec<LineItem> = serde_json::from_str(&row.components)?;
        let tags: Vec<String> = serde_json::from_str(&row.tags)?;

        Ok(Configuration {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            description: row.description,
            components,
            total_cost_cents: row.total_cost_cents,
            is_public: row.is_public,
            tags,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str = "id, user_id, name, description, components, total_cost_cents, \
     is_public, tags, created_at, updated_at";

/// Repository for configuration database operations.
#[derive(Debug, Clone)]
pub struct ConfigurationRepository {
    pool: SqlitePool,
}

impl ConfigurationRepository {
    /// Creates a new ConfigurationRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ConfigurationRepository { pool }
    }

    /// Inserts a configuration and appends its id to the owner's
    /// back-reference list, both in one transaction.
    pub async fn insert(&self, configuration: &Configuration) -> DbResult<()> {
        debug!(
            id = %configuration.id,
            user_id = %configuration.user_id,
            total_cost_cents = configuration.total_cost_cents,
            "Inserting configuration"
        );

        let components = serde_json::to_string(&configuration.components)?;
        let tags = serde_json::to_string(&configuration.tags)?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO configurations (
                id, user_id, name, description, components, total_cost_cents,
                is_public, tags, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&configuration.id)
        .bind(&configuration.user_id)
        .bind(&configuration.name)
        .bind(&configuration.description)
        .bind(components)
        .bind(configuration.total_cost_cents)
        .bind(configuration.is_public)
        .bind(tags)
        .bind(configuration.created_at)
        .bind(configuration.updated_at)
        .execute(&mut *tx)
        .await?;

        // '$[#]' appends to the JSON array in a single statement
        sqlx::query(
            r#"
            UPDATE users
            SET configuration_ids = json_insert(configuration_ids, '$[#]', ?2),
                updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(&configuration.user_id)
        .bind(&configuration.id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Gets a configuration by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Configuration>> {
        let row: Option<ConfigurationRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM configurations WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Configuration::try_from).transpose()
    }

    /// Lists one user's configurations, newest first.
    pub async fn list_for_user(&self, user_id: &str) -> DbResult<Vec<Configuration>> {
        let rows: Vec<ConfigurationRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM configurations \
             WHERE user_id = ?1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Configuration::try_from).collect()
    }

    /// Lists configurations across all users, newest first, with an optional
    /// owner filter.
    pub async fn list_all(
        &self,
        owner_id: Option<&str>,
        limit: u32,
        offset: u32,
    ) -> DbResult<Vec<Configuration>> {
        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {SELECT_COLUMNS} FROM configurations WHERE 1 = 1"));

        if let Some(owner_id) = owner_id {
            qb.push(" AND user_id = ").push_bind(owner_id);
        }

        qb.push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let rows: Vec<ConfigurationRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter().map(Configuration::try_from).collect()
    }

    /// Counts one user's configurations.
    pub async fn count_for_user(&self, user_id: &str) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM configurations WHERE user_id = ?1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// Updates a configuration row in full.
    pub async fn update(&self, configuration: &Configuration) -> DbResult<()> {
        debug!(id = %configuration.id, "Updating configuration");

        let components = serde_json::to_string(&configuration.components)?;
        let tags = serde_json::to_string(&configuration.tags)?;

        let result = sqlx::query(
            r#"
            UPDATE configurations SET
                name = ?2,
                description = ?3,
                components = ?4,
                total_cost_cents = ?5,
                is_public = ?6,
                tags = ?7,
                updated_at = ?8
            WHERE id = ?1
            "#,
        )
        .bind(&configuration.id)
        .bind(&configuration.name)
        .bind(&configuration.description)
        .bind(components)
        .bind(configuration.total_cost_cents)
        .bind(configuration.is_public)
        .bind(tags)
        .bind(configuration.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Configuration", &configuration.id));
        }

        Ok(())
    }

    /// Deletes a configuration and removes the owner's back-reference to
    /// it, both in one transaction.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting configuration");

        let mut tx = self.pool.begin().await?;

        let owner_id: Option<String> =
            sqlx::query_scalar("SELECT user_id FROM configurations WHERE id = ?1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let owner_id = owner_id.ok_or_else(|| DbError::not_found("Configuration", id))?;

        sqlx::query("DELETE FROM configurations WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            UPDATE users
            SET configuration_ids = (
                    SELECT json_group_array(value)
                    FROM json_each(users.configuration_ids)
                    WHERE value <> ?2
                ),
                updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(&owner_id)
        .bind(id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Deletes all configurations owned by a user, returning how many rows
    /// were removed. Used by the admin user-deletion cascade.
    pub async fn delete_for_user(&self, user_id: &str) -> DbResult<u64> {
        debug!(user_id = %user_id, "Deleting all configurations for user");

        let result = sqlx::query("DELETE FROM configurations WHERE user_id = ?1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
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
    use rigforge_core::{Role, User};

    async fn seed_user(db: &Database, email: &str) -> User {
        let now = Utc::now();
        let user = User {
            id: generate_id(),
            name: "Test".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
            role: Role::User,
            configuration_ids: vec![],
            created_at: now,
            updated_at: now,
        };
        db.users().insert(&user).await.unwrap();
        user
    }

    fn configuration(user_id: &str, name: &str, total_cents: i64) -> Configuration {
        let now = Utc::now();
        Configuration {
            id: generate_id(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            description: None,
            components: vec![LineItem {
                component_id: "comp-1".to_string(),
                selected_partner_id: None,
                price_cents: total_cents,
                quantity: 1,
            }],
            total_cost_cents: total_cents,
            is_public: false,
            tags: vec!["gaming".to_string()],
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_roundtrip_line_items() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let owner = seed_user(&db, "owner@example.com").await;
        let repo = db.configurations();

        let cfg = configuration(&owner.id, "Gaming rig", 119998);
        repo.insert(&cfg).await.unwrap();

        let fetched = repo.get_by_id(&cfg.id).await.unwrap().unwrap();
        assert_eq!(fetched.total_cost_cents, 119998);
        assert_eq!(fetched.components.len(), 1);
        assert_eq!(fetched.tags, vec!["gaming"]);
    }

    #[tokio::test]
    async fn test_insert_with_unknown_owner_fails() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.configurations();

        let cfg = configuration("no-such-user", "Orphan", 100);
        let err = repo.insert(&cfg).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_list_for_user_newest_first() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let owner = seed_user(&db, "owner@example.com").await;
        let other = seed_user(&db, "other@example.com").await;
        let repo = db.configurations();

        let mut first = configuration(&owner.id, "First", 100);
        first.created_at = Utc::now() - chrono::Duration::hours(1);
        repo.insert(&first).await.unwrap();
        repo.insert(&configuration(&owner.id, "Second", 200))
            .await
            .unwrap();
        repo.insert(&configuration(&other.id, "Elsewhere", 300))
            .await
            .unwrap();

        let mine = repo.list_for_user(&owner.id).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].name, "Second");
        assert_eq!(mine[1].name, "First");

        assert_eq!(repo.count_for_user(&owner.id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_insert_and_delete_maintain_owner_backref() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let owner = seed_user(&db, "owner@example.com").await;
        let repo = db.configurations();

        let first = configuration(&owner.id, "First", 100);
        let second = configuration(&owner.id, "Second", 200);
        repo.insert(&first).await.unwrap();
        repo.insert(&second).await.unwrap();

        let fetched = db.users().get_by_id(&owner.id).await.unwrap().unwrap();
        assert_eq!(
            fetched.configuration_ids,
            vec![first.id.clone(), second.id.clone()]
        );

        repo.delete(&first.id).await.unwrap();

        let fetched = db.users().get_by_id(&owner.id).await.unwrap().unwrap();
        assert_eq!(fetched.configuration_ids, vec![second.id.clone()]);

        // Deleting a missing row leaves the list untouched
        let err = repo.delete(&first.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_for_user_cascade() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let owner = seed_user(&db, "owner@example.com").await;
        let repo = db.configurations();

        repo.insert(&configuration(&owner.id, "A", 100)).await.unwrap();
        repo.insert(&configuration(&owner.id, "B", 200)).await.unwrap();

        let removed = repo.delete_for_user(&owner.id).await.unwrap();
        assert_eq!(removed, 2);
        assert!(repo.list_for_user(&owner.id).await.unwrap().is_empty());

        // No rows is not an error for the cascade path.
        assert_eq!(repo.delete_for_user(&owner.id).await.unwrap(), 0);
    }
}
