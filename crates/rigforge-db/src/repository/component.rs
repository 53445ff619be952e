//! # Component Repository
//!
//! Database operations for catalog components.
//!
//! ## Embedded aggregates
//! `specifications` and `partner_prices` are JSON TEXT columns; each row is
//! one whole aggregate. Sub-item edits (partner prices) are read-modify-write
//! through [`ComponentRepository::update`], last-write-wins at row
//! granularity.
//!
//! ## Referential check
//! [`ComponentRepository::find_by_ids`] is the catalog-store contract used
//! before a configuration is accepted: the caller compares the returned
//! subset against the requested ids.

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use rigforge_core::{Component, PartnerPrice, Specification};

/// Row shape for the `components` table.
#[derive(sqlx::FromRow)]
struct ComponentRow {
    id: String,
    category_id: String,
    brand: String,
    title: String,
    model: String,
    description: Option<String>,
    specifications: String,
    image: Option<String>,
    base_price_cents: i64,
    partner_prices: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ComponentRow> for Component {
    type Error = DbError;

    fn try_from(row: ComponentRow) -> Result<Self, Self::Error> {
        let specifications: Vec<Specification> = serde_json::from_str(&row.specifications)?;
        let partner_prices: Vec<PartnerPrice> = serde_json::from_str(&row.partner_prices)?;

        Ok(Component {
            id: row.id,
            category_id: row.category_id,
            brand: row.brand,
            title: row.title,
            model: row.model,
            description: row.description,
            specifications,
            image: row.image,
            base_price_cents: row.base_price_cents,
            partner_prices,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str = "id, category_id, brand, title, model, description, \
     specifications, image, base_price_cents, partner_prices, is_active, \
     created_at, updated_at";

/// Listing filter for components.
#[derive(Debug, Clone, Default)]
pub struct ComponentFilter {
    /// Restrict to one category.
    pub category_id: Option<String>,

    /// Case-insensitive brand substring.
    pub brand: Option<String>,

    /// Lower bound on base price, in cents.
    pub min_price_cents: Option<i64>,

    /// Upper bound on base price, in cents.
    pub max_price_cents: Option<i64>,

    /// Include soft-deleted components. Defaults to false.
    pub include_inactive: bool,
}

/// Repository for component database operations.
#[derive(Debug, Clone)]
pub struct ComponentRepository {
    pool: SqlitePool,
}

impl ComponentRepository {
    /// Creates a new ComponentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ComponentRepository { pool }
    }

    /// Inserts a component.
    pub async fn insert(&self, component: &Component) -> DbResult<()> {
        debug!(id = %component.id, title = %component.title, "Inserting component");

        let specifications = serde_json::to_string(&component.specifications)?;
        let partner_prices = serde_json::to_string(&component.partner_prices)?;

        sqlx::query(
            r#"
            INSERT INTO components (
                id, category_id, brand, title, model, description,
                specifications, image, base_price_cents, partner_prices,
                is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
        )
        .bind(&component.id)
        .bind(&component.category_id)
        .bind(&component.brand)
        .bind(&component.title)
        .bind(&component.model)
        .bind(&component.description)
        .bind(specifications)
        .bind(&component.image)
        .bind(component.base_price_cents)
        .bind(partner_prices)
        .bind(component.is_active)
        .bind(component.created_at)
        .bind(component.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a component by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Component>> {
        let row: Option<ComponentRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM components WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Component::try_from).transpose()
    }

    /// Gets the subset of existing components matching `ids`.
    ///
    /// Returns only the rows that exist; the caller decides what a shorter
    /// result set means (for configuration creation: rejection).
    pub async fn find_by_ids(&self, ids: &[String]) -> DbResult<Vec<Component>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {SELECT_COLUMNS} FROM components WHERE id IN ("));
        let mut separated = qb.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        qb.push(")");

        let rows: Vec<ComponentRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter().map(Component::try_from).collect()
    }

    /// Lists components matching a filter, newest first.
    pub async fn list(
        &self,
        filter: &ComponentFilter,
        limit: u32,
        offset: u32,
    ) -> DbResult<Vec<Component>> {
        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {SELECT_COLUMNS} FROM components WHERE 1 = 1"));

        if !filter.include_inactive {
            qb.push(" AND is_active = 1");
        }
        if let Some(category_id) = &filter.category_id {
            qb.push(" AND category_id = ").push_bind(category_id);
        }
        if let Some(brand) = &filter.brand {
            qb.push(" AND brand LIKE ")
                .push_bind(format!("%{}%", brand));
        }
        if let Some(min) = filter.min_price_cents {
            qb.push(" AND base_price_cents >= ").push_bind(min);
        }
        if let Some(max) = filter.max_price_cents {
            qb.push(" AND base_price_cents <= ").push_bind(max);
        }

        qb.push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let rows: Vec<ComponentRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter().map(Component::try_from).collect()
    }

    /// Updates a component row in full, embedded offers included
    /// (last-write-wins).
    pub async fn update(&self, component: &Component) -> DbResult<()> {
        debug!(id = %component.id, "Updating component");

        let specifications = serde_json::to_string(&component.specifications)?;
        let partner_prices = serde_json::to_string(&component.partner_prices)?;

        let result = sqlx::query(
            r#"
            UPDATE components SET
                category_id = ?2,
                brand = ?3,
                title = ?4,
                model = ?5,
                description = ?6,
                specifications = ?7,
                image = ?8,
                base_price_cents = ?9,
                partner_prices = ?10,
                is_active = ?11,
                updated_at = ?12
            WHERE id = ?1
            "#,
        )
        .bind(&component.id)
        .bind(&component.category_id)
        .bind(&component.brand)
        .bind(&component.title)
        .bind(&component.model)
        .bind(&component.description)
        .bind(specifications)
        .bind(&component.image)
        .bind(component.base_price_cents)
        .bind(partner_prices)
        .bind(component.is_active)
        .bind(component.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Component", &component.id));
        }

        Ok(())
    }

    /// Deletes a component.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting component");

        let result = sqlx::query("DELETE FROM components WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Component", id));
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
    use rigforge_core::slug::slugify;
    use rigforge_core::Category;

    async fn seed_category(db: &Database, name: &str) -> Category {
        let now = Utc::now();
        let cat = Category {
            id: generate_id(),
            name: name.to_string(),
            slug: slugify(name),
            description: None,
            icon: None,
            created_at: now,
            updated_at: now,
        };
        db.categories().insert(&cat).await.unwrap();
        cat
    }

    fn component(category_id: &str, brand: &str, title: &str, price_cents: i64) -> Component {
        let now = Utc::now();
        Component {
            id: generate_id(),
            category_id: category_id.to_string(),
            brand: brand.to_string(),
            title: title.to_string(),
            model: "generic".to_string(),
            description: None,
            specifications: vec![Specification {
                name: "Socket".to_string(),
                value: "LGA1700".to_string(),
            }],
            image: None,
            base_price_cents: price_cents,
            partner_prices: vec![],
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_and_roundtrip_embedded_json() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let cat = seed_category(&db, "Processeur (CPU)").await;
        let repo = db.components();

        let mut comp = component(&cat.id, "Intel", "Intel Core i9", 59999);
        comp.partner_prices.push(PartnerPrice {
            id: generate_id(),
            partner_id: "p1".to_string(),
            price_cents: 57999,
            url: Some("https://shop.example/i9".to_string()),
            in_stock: true,
            last_updated: Utc::now(),
        });
        repo.insert(&comp).await.unwrap();

        let fetched = repo.get_by_id(&comp.id).await.unwrap().unwrap();
        assert_eq!(fetched.specifications.len(), 1);
        assert_eq!(fetched.partner_prices.len(), 1);
        assert_eq!(fetched.partner_prices[0].price_cents, 57999);
    }

    #[tokio::test]
    async fn test_find_by_ids_returns_existing_subset() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let cat = seed_category(&db, "Stockage").await;
        let repo = db.components();

        let a = component(&cat.id, "Samsung", "SSD 990 Pro", 14999);
        let b = component(&cat.id, "Crucial", "P5 Plus", 9999);
        repo.insert(&a).await.unwrap();
        repo.insert(&b).await.unwrap();

        let found = repo
            .find_by_ids(&[a.id.clone(), b.id.clone(), "missing".to_string()])
            .await
            .unwrap();
        assert_eq!(found.len(), 2);

        assert!(repo.find_by_ids(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_with_unknown_category_fails() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.components();

        let comp = component("no-such-category", "AMD", "Ryzen 9", 49999);
        let err = repo.insert(&comp).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_list_filters() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let cpus = seed_category(&db, "Processeur (CPU)").await;
        let gpus = seed_category(&db, "Carte graphique (GPU)").await;
        let repo = db.components();

        repo.insert(&component(&cpus.id, "Intel", "Core i9", 59999))
            .await
            .unwrap();
        repo.insert(&component(&cpus.id, "AMD", "Ryzen 9", 49999))
            .await
            .unwrap();
        let mut inactive = component(&gpus.id, "NVIDIA", "RTX 4090", 179999);
        inactive.is_active = false;
        repo.insert(&inactive).await.unwrap();

        let all_active = repo.list(&ComponentFilter::default(), 20, 0).await.unwrap();
        assert_eq!(all_active.len(), 2);

        let intel = repo
            .list(
                &ComponentFilter {
                    brand: Some("ntel".to_string()),
                    ..Default::default()
                },
                20,
                0,
            )
            .await
            .unwrap();
        assert_eq!(intel.len(), 1);
        assert_eq!(intel[0].brand, "Intel");

        let cheap = repo
            .list(
                &ComponentFilter {
                    max_price_cents: Some(50000),
                    ..Default::default()
                },
                20,
                0,
            )
            .await
            .unwrap();
        assert_eq!(cheap.len(), 1);

        let with_inactive = repo
            .list(
                &ComponentFilter {
                    include_inactive: true,
                    ..Default::default()
                },
                20,
                0,
            )
            .await
            .unwrap();
        assert_eq!(with_inactive.len(), 3);
    }
}
