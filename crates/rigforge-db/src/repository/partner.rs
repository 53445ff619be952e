//! # Partner Repository
//!
//! Database operations for merchant partners.
//!
//! Affiliate program fields are flattened into the row; external feed
//! credentials (sync settings) are deliberately not persisted.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use rigforge_core::{AffiliateProgram, Partner};

/// Row shape for the `partners` table.
#[derive(sqlx::FromRow)]
struct PartnerRow {
    id: String,
    name: String,
    website: String,
    logo: Option<String>,
    commission_rate_bps: u32,
    affiliate_terms: Option<String>,
    affiliate_id: Option<String>,
    is_active: bool,
    contact_email: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PartnerRow> for Partner {
    fn from(row: PartnerRow) -> Self {
        Partner {
            id: row.id,
            name: row.name,
            website: row.website,
            logo: row.logo,
            affiliate: AffiliateProgram {
                commission_rate_bps: row.commission_rate_bps,
                terms: row.affiliate_terms,
                affiliate_id: row.affiliate_id,
            },
            is_active: row.is_active,
            contact_email: row.contact_email,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_COLUMNS: &str = "id, name, website, logo, commission_rate_bps, \
     affiliate_terms, affiliate_id, is_active, contact_email, created_at, updated_at";

/// Repository for partner database operations.
#[derive(Debug, Clone)]
pub struct PartnerRepository {
    pool: SqlitePool,
}

impl PartnerRepository {
    /// Creates a new PartnerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PartnerRepository { pool }
    }

    /// Inserts a partner.
    pub async fn insert(&self, partner: &Partner) -> DbResult<()> {
        debug!(id = %partner.id, name = %partner.name, "Inserting partner");

        sqlx::query(
            r#"
            INSERT INTO partners (
                id, name, website, logo,
                commission_rate_bps, affiliate_terms, affiliate_id,
                is_active, contact_email, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(&partner.id)
        .bind(&partner.name)
        .bind(&partner.website)
        .bind(&partner.logo)
        .bind(partner.affiliate.commission_rate_bps)
        .bind(&partner.affiliate.terms)
        .bind(&partner.affiliate.affiliate_id)
        .bind(partner.is_active)
        .bind(&partner.contact_email)
        .bind(partner.created_at)
        .bind(partner.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_duplicate_value(".name", &partner.name))?;

        Ok(())
    }

    /// Gets a partner by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Partner>> {
        let row: Option<PartnerRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM partners WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Partner::from))
    }

    /// Checks whether a partner id exists.
    pub async fn exists(&self, id: &str) -> DbResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM partners WHERE id = ?1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    /// Lists partners ordered by name, optionally restricted to active ones.
    pub async fn list(&self, active_only: bool) -> DbResult<Vec<Partner>> {
        let sql = if active_only {
            format!("SELECT {SELECT_COLUMNS} FROM partners WHERE is_active = 1 ORDER BY name")
        } else {
            format!("SELECT {SELECT_COLUMNS} FROM partners ORDER BY name")
        };

        let rows: Vec<PartnerRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Partner::from).collect())
    }

    /// Updates a partner row in full (last-write-wins).
    pub async fn update(&self, partner: &Partner) -> DbResult<()> {
        debug!(id = %partner.id, "Updating partner");

        let result = sqlx::query(
            r#"
            UPDATE partners SET
                name = ?2,
                website = ?3,
                logo = ?4,
                commission_rate_bps = ?5,
                affiliate_terms = ?6,
                affiliate_id = ?7,
                is_active = ?8,
                contact_email = ?9,
                updated_at = ?10
            WHERE id = ?1
            "#,
        )
        .bind(&partner.id)
        .bind(&partner.name)
        .bind(&partner.website)
        .bind(&partner.logo)
        .bind(partner.affiliate.commission_rate_bps)
        .bind(&partner.affiliate.terms)
        .bind(&partner.affiliate.affiliate_id)
        .bind(partner.is_active)
        .bind(&partner.contact_email)
        .bind(partner.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_duplicate_value(".name", &partner.name))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Partner", &partner.id));
        }

        Ok(())
    }

    /// Deletes a partner.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting partner");

        let result = sqlx::query("DELETE FROM partners WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Partner", id));
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

    fn partner(name: &str) -> Partner {
        let now = Utc::now();
        Partner {
            id: generate_id(),
            name: name.to_string(),
            website: "https://www.example.com".to_string(),
            logo: None,
            affiliate: AffiliateProgram {
                commission_rate_bps: 500,
                terms: Some("5% on all sales".to_string()),
                affiliate_id: Some("AMZ-12345".to_string()),
            },
            is_active: true,
            contact_email: Some("partners@example.com".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_fetch() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.partners();

        let p = partner("Amazon");
        repo.insert(&p).await.unwrap();

        let fetched = repo.get_by_id(&p.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Amazon");
        assert_eq!(fetched.affiliate.commission_rate_bps, 500);
        assert!(repo.exists(&p.id).await.unwrap());
        assert!(!repo.exists("missing").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.partners();

        repo.insert(&partner("LDLC")).await.unwrap();
        let err = repo.insert(&partner("LDLC")).await.unwrap_err();
        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "partners.name");
                assert_eq!(value, "LDLC");
            }
            other => panic!("expected UniqueViolation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_active_filter() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.partners();

        let mut inactive = partner("RueduCommerce");
        inactive.is_active = false;
        repo.insert(&partner("Amazon")).await.unwrap();
        repo.insert(&inactive).await.unwrap();

        assert_eq!(repo.list(false).await.unwrap().len(), 2);
        assert_eq!(repo.list(true).await.unwrap().len(), 1);
    }
}
