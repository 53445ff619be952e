//! Catalog administration.
//!
//! Admin-gated CRUD over categories, components and partners, plus the
//! partner-price sub-operations on a component. Reads (get/list) are open;
//! every mutation passes the hard admin gate first.

use chrono::Utc;
use tracing::{debug, info};

use rigforge_core::slug::slugify;
use rigforge_core::{
    access, validation, AffiliateProgram, Category, Component, Partner, PartnerPrice, Requester,
    Specification,
};
use rigforge_db::repository::generate_id;
use rigforge_db::{ComponentFilter, Database};

use crate::error::{ServiceError, ServiceResult};

// =============================================================================
// Inputs
// =============================================================================

/// Input for creating a category.
#[derive(Debug, Clone)]
pub struct CategoryDraft {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

/// Partial update for a category. A name change re-derives the slug.
/// Nullable fields are doubly optional: the outer level means "change
/// it", the inner is the new value (`None` clears). Same convention on
/// the other `*Changes` types below.
#[derive(Debug, Clone, Default)]
pub struct CategoryChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub icon: Option<Option<String>>,
}

/// Input for creating a component.
#[derive(Debug, Clone)]
pub struct ComponentDraft {
    pub category_id: String,
    pub brand: String,
    pub title: String,
    pub model: String,
    pub description: Option<String>,
    pub specifications: Vec<Specification>,
    pub image: Option<String>,
    pub base_price_cents: i64,
}

/// Partial update for a component.
#[derive(Debug, Clone, Default)]
pub struct ComponentChanges {
    pub category_id: Option<String>,
    pub brand: Option<String>,
    pub title: Option<String>,
    pub model: Option<String>,
    pub description: Option<Option<String>>,
    pub specifications: Option<Vec<Specification>>,
    pub image: Option<Option<String>>,
    pub base_price_cents: Option<i64>,
    pub is_active: Option<bool>,
}

/// Input for creating a partner.
#[derive(Debug, Clone)]
pub struct PartnerDraft {
    pub name: String,
    pub website: String,
    pub logo: Option<String>,
    pub affiliate: AffiliateProgram,
    pub contact_email: Option<String>,
}

/// Partial update for a partner.
#[derive(Debug, Clone, Default)]
pub struct PartnerChanges {
    pub name: Option<String>,
    pub website: Option<String>,
    pub logo: Option<Option<String>>,
    pub affiliate: Option<AffiliateProgram>,
    pub is_active: Option<bool>,
    pub contact_email: Option<Option<String>>,
}

/// Input for one partner-price entry on a component.
#[derive(Debug, Clone)]
pub struct PartnerPriceDraft {
    pub partner_id: String,
    pub price_cents: i64,
    pub url: Option<String>,
    pub in_stock: bool,
}

// =============================================================================
// Service
// =============================================================================

/// Service managing the hardware catalog.
#[derive(Debug, Clone)]
pub struct CatalogService {
    db: Database,
}

impl CatalogService {
    /// Create a new catalog service.
    pub fn new(db: Database) -> Self {
        CatalogService { db }
    }

    // -------------------------------------------------------------------------
    // Categories
    // -------------------------------------------------------------------------

    /// Creates a category; admin only. The slug is derived from the name.
    pub async fn create_category(
        &self,
        requester: &Requester,
        draft: CategoryDraft,
    ) -> ServiceResult<Category> {
        access::require_admin(requester)?;
        validation::validate_name("name", &draft.name)?;

        let now = Utc::now();
        let category = Category {
            id: generate_id(),
            slug: slugify(&draft.name),
            name: draft.name,
            description: draft.description,
            icon: draft.icon,
            created_at: now,
            updated_at: now,
        };

        self.db.categories().insert(&category).await?;
        info!(id = %category.id, slug = %category.slug, "Category created");
        Ok(category)
    }

    /// Gets a category by id.
    pub async fn get_category(&self, id: &str) -> ServiceResult<Category> {
        self.db
            .categories()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Category", id))
    }

    /// Lists all categories ordered by name.
    pub async fn list_categories(&self) -> ServiceResult<Vec<Category>> {
        Ok(self.db.categories().list().await?)
    }

    /// Updates a category; admin only. Renaming re-derives the slug.
    pub async fn update_category(
        &self,
        requester: &Requester,
        id: &str,
        changes: CategoryChanges,
    ) -> ServiceResult<Category> {
        access::require_admin(requester)?;
        let mut category = self.get_category(id).await?;

        if let Some(name) = changes.name {
            validation::validate_name("name", &name)?;
            category.slug = slugify(&name);
            category.name = name;
        }
        if let Some(description) = changes.description {
            category.description = description;
        }
        if let Some(icon) = changes.icon {
            category.icon = icon;
        }

        category.updated_at = Utc::now();
        self.db.categories().update(&category).await?;

        debug!(id = %category.id, slug = %category.slug, "Category updated");
        Ok(category)
    }

    /// Deletes a category; admin only. Components referencing it keep the
    /// delete from succeeding (foreign key).
    pub async fn delete_category(&self, requester: &Requester, id: &str) -> ServiceResult<()> {
        access::require_admin(requester)?;
        self.db.categories().delete(id).await?;
        info!(id = %id, "Category deleted");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Components
    // -------------------------------------------------------------------------

    /// Creates a component; admin only. The category must exist.
    pub async fn create_component(
        &self,
        requester: &Requester,
        draft: ComponentDraft,
    ) -> ServiceResult<Component> {
        access::require_admin(requester)?;
        validation::validate_name("title", &draft.title)?;
        validation::validate_name("brand", &draft.brand)?;
        validation::validate_price_cents(draft.base_price_cents)?;

        if self.db.categories().get_by_id(&draft.category_id).await?.is_none() {
            return Err(ServiceError::referential("Category", draft.category_id));
        }

        let now = Utc::now();
        let component = Component {
            id: generate_id(),
            category_id: draft.category_id,
            brand: draft.brand,
            title: draft.title,
            model: draft.model,
            description: draft.description,
            specifications: draft.specifications,
            image: draft.image,
            base_price_cents: draft.base_price_cents,
            partner_prices: Vec::new(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        self.db.components().insert(&component).await?;
        info!(id = %component.id, title = %component.title, "Component created");
        Ok(component)
    }

    /// Gets a component by id.
    pub async fn get_component(&self, id: &str) -> ServiceResult<Component> {
        self.db
            .components()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Component", id))
    }

    /// Lists components matching a filter, newest first.
    pub async fn list_components(
        &self,
        filter: &ComponentFilter,
        limit: u32,
        offset: u32,
    ) -> ServiceResult<Vec<Component>> {
        Ok(self.db.components().list(filter, limit, offset).await?)
    }

    /// Updates a component; admin only.
    pub async fn update_component(
        &self,
        requester: &Requester,
        id: &str,
        changes: ComponentChanges,
    ) -> ServiceResult<Component> {
        access::require_admin(requester)?;
        let mut component = self.get_component(id).await?;

        if let Some(category_id) = changes.category_id {
            if self.db.categories().get_by_id(&category_id).await?.is_none() {
                return Err(ServiceError::referential("Category", category_id));
            }
            component.category_id = category_id;
        }
        if let Some(brand) = changes.brand {
            validation::validate_name("brand", &brand)?;
            component.brand = brand;
        }
        if let Some(title) = changes.title {
            validation::validate_name("title", &title)?;
            component.title = title;
        }
        if let Some(model) = changes.model {
            component.model = model;
        }
        if let Some(description) = changes.description {
            component.description = description;
        }
        if let Some(specifications) = changes.specifications {
            component.specifications = specifications;
        }
        if let Some(image) = changes.image {
            component.image = image;
        }
        if let Some(base_price_cents) = changes.base_price_cents {
            validation::validate_price_cents(base_price_cents)?;
            component.base_price_cents = base_price_cents;
        }
        if let Some(is_active) = changes.is_active {
            component.is_active = is_active;
        }

        component.updated_at = Utc::now();
        self.db.components().update(&component).await?;

        debug!(id = %component.id, "Component updated");
        Ok(component)
    }

    /// Deletes a component; admin only.
    pub async fn delete_component(&self, requester: &Requester, id: &str) -> ServiceResult<()> {
        access::require_admin(requester)?;
        self.db.components().delete(id).await?;
        info!(id = %id, "Component deleted");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Partner prices (embedded in a component)
    // -------------------------------------------------------------------------

    /// Adds a partner-price entry to a component; admin only. The partner
    /// must exist. Returns the updated component.
    pub async fn add_partner_price(
        &self,
        requester: &Requester,
        component_id: &str,
        draft: PartnerPriceDraft,
    ) -> ServiceResult<Component> {
        access::require_admin(requester)?;
        validation::validate_price_cents(draft.price_cents)?;

        if !self.db.partners().exists(&draft.partner_id).await? {
            return Err(ServiceError::referential("Partner", draft.partner_id));
        }

        let mut component = self.get_component(component_id).await?;
        component.partner_prices.push(PartnerPrice {
            id: generate_id(),
            partner_id: draft.partner_id,
            price_cents: draft.price_cents,
            url: draft.url,
            in_stock: draft.in_stock,
            last_updated: Utc::now(),
        });

        component.updated_at = Utc::now();
        self.db.components().update(&component).await?;

        debug!(component_id = %component.id, "Partner price added");
        Ok(component)
    }

    /// Updates a partner-price entry by its sub-id; admin only. Refreshes
    /// the entry's `last_updated`.
    pub async fn update_partner_price(
        &self,
        requester: &Requester,
        component_id: &str,
        price_id: &str,
        draft: PartnerPriceDraft,
    ) -> ServiceResult<Component> {
        access::require_admin(requester)?;
        validation::validate_price_cents(draft.price_cents)?;

        if !self.db.partners().exists(&draft.partner_id).await? {
            return Err(ServiceError::referential("Partner", draft.partner_id));
        }

        let mut component = self.get_component(component_id).await?;
        let entry = component
            .partner_prices
            .iter_mut()
            .find(|p| p.id == price_id)
            .ok_or_else(|| ServiceError::not_found("PartnerPrice", price_id))?;

        entry.partner_id = draft.partner_id;
        entry.price_cents = draft.price_cents;
        entry.url = draft.url;
        entry.in_stock = draft.in_stock;
        entry.last_updated = Utc::now();

        component.updated_at = Utc::now();
        self.db.components().update(&component).await?;

        debug!(component_id = %component.id, price_id = %price_id, "Partner price updated");
        Ok(component)
    }

    /// Removes a partner-price entry by its sub-id; admin only.
    pub async fn remove_partner_price(
        &self,
        requester: &Requester,
        component_id: &str,
        price_id: &str,
    ) -> ServiceResult<Component> {
        access::require_admin(requester)?;

        let mut component = self.get_component(component_id).await?;
        let before = component.partner_prices.len();
        component.partner_prices.retain(|p| p.id != price_id);
        if component.partner_prices.len() == before {
            return Err(ServiceError::not_found("PartnerPrice", price_id));
        }

        component.updated_at = Utc::now();
        self.db.components().update(&component).await?;

        debug!(component_id = %component.id, price_id = %price_id, "Partner price removed");
        Ok(component)
    }

    // -------------------------------------------------------------------------
    // Partners
    // -------------------------------------------------------------------------

    /// Creates a partner; admin only.
    pub async fn create_partner(
        &self,
        requester: &Requester,
        draft: PartnerDraft,
    ) -> ServiceResult<Partner> {
        access::require_admin(requester)?;
        validation::validate_name("name", &draft.name)?;
        validation::validate_website(&draft.website)?;
        validation::validate_commission_rate_bps(draft.affiliate.commission_rate_bps)?;
        let contact_email = match draft.contact_email {
            Some(email) => Some(validation::validate_email(&email)?),
            None => None,
        };

        let now = Utc::now();
        let partner = Partner {
            id: generate_id(),
            name: draft.name,
            website: draft.website,
            logo: draft.logo,
            affiliate: draft.affiliate,
            is_active: true,
            contact_email,
            created_at: now,
            updated_at: now,
        };

        self.db.partners().insert(&partner).await?;
        info!(id = %partner.id, name = %partner.name, "Partner created");
        Ok(partner)
    }

    /// Gets a partner by id.
    pub async fn get_partner(&self, id: &str) -> ServiceResult<Partner> {
        self.db
            .partners()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Partner", id))
    }

    /// Lists partners, optionally only active ones.
    pub async fn list_partners(&self, active_only: bool) -> ServiceResult<Vec<Partner>> {
        Ok(self.db.partners().list(active_only).await?)
    }

    /// Updates a partner; admin only.
    pub async fn update_partner(
        &self,
        requester: &Requester,
        id: &str,
        changes: PartnerChanges,
    ) -> ServiceResult<Partner> {
        access::require_admin(requester)?;
        let mut partner = self.get_partner(id).await?;

        if let Some(name) = changes.name {
            validation::validate_name("name", &name)?;
            partner.name = name;
        }
        if let Some(website) = changes.website {
            validation::validate_website(&website)?;
            partner.website = website;
        }
        if let Some(logo) = changes.logo {
            partner.logo = logo;
        }
        if let Some(affiliate) = changes.affiliate {
            validation::validate_commission_rate_bps(affiliate.commission_rate_bps)?;
            partner.affiliate = affiliate;
        }
        if let Some(is_active) = changes.is_active {
            partner.is_active = is_active;
        }
        if let Some(contact_email) = changes.contact_email {
            partner.contact_email = match contact_email {
                Some(email) => Some(validation::validate_email(&email)?),
                None => None,
            };
        }

        partner.updated_at = Utc::now();
        self.db.partners().update(&partner).await?;

        debug!(id = %partner.id, "Partner updated");
        Ok(partner)
    }

    /// Deletes a partner; admin only.
    pub async fn delete_partner(&self, requester: &Requester, id: &str) -> ServiceResult<()> {
        access::require_admin(requester)?;
        self.db.partners().delete(id).await?;
        info!(id = %id, "Partner deleted");
        Ok(())
    }
}
