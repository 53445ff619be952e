//! Configuration manager.
//!
//! Orchestrates the lifecycle of saved build configurations: input
//! validation, referential checks against the catalog, total computation,
//! authorization gates, and owner back-reference maintenance. All checks run
//! before any write, so a rejected create or update persists nothing.

use chrono::Utc;
use tracing::{debug, info};

use rigforge_core::{
    access, pricing, validation, Component, Configuration, LineItem, Money, Requester,
};
use rigforge_db::repository::generate_id;
use rigforge_db::Database;

use crate::error::{ServiceError, ServiceResult};

/// Input for creating a configuration.
#[derive(Debug, Clone)]
pub struct ConfigurationDraft {
    pub name: String,
    pub description: Option<String>,
    pub components: Vec<LineItem>,
    pub is_public: bool,
    pub tags: Vec<String>,
}

/// Partial update for a configuration. `None` fields are left untouched;
/// a `components` change triggers revalidation and total recomputation.
/// `description` is doubly optional: the outer level means "change it",
/// the inner is the new value (`None` clears).
#[derive(Debug, Clone, Default)]
pub struct ConfigurationChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub components: Option<Vec<LineItem>>,
    pub is_public: Option<bool>,
    pub tags: Option<Vec<String>>,
}

/// One line of a price breakdown.
#[derive(Debug, Clone)]
pub struct BreakdownLine {
    pub component_id: String,
    pub title: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub subtotal: Money,
}

/// Per-line price breakdown plus the stored total.
#[derive(Debug, Clone)]
pub struct PriceBreakdown {
    pub lines: Vec<BreakdownLine>,
    pub total: Money,
}

/// One fully-resolved line of a populated configuration.
#[derive(Debug, Clone)]
pub struct PopulatedLine {
    pub component_id: String,
    pub title: String,
    pub brand: String,
    pub model: String,
    pub category_name: String,
    pub partner_name: Option<String>,
    pub unit_price: Money,
    pub quantity: i64,
    pub subtotal: Money,
}

/// Fully-resolved view of a configuration, handed to external renderers.
#[derive(Debug, Clone)]
pub struct PopulatedConfiguration {
    pub configuration: Configuration,
    pub owner_name: String,
    pub lines: Vec<PopulatedLine>,
}

/// Service managing build configurations.
#[derive(Debug, Clone)]
pub struct ConfigurationService {
    db: Database,
}

impl ConfigurationService {
    /// Create a new configuration service.
    pub fn new(db: Database) -> Self {
        ConfigurationService { db }
    }

    /// Creates a configuration owned by the requester.
    ///
    /// Line items are validated and resolved against the catalog before
    /// anything is written; a single unknown component or partner rejects
    /// the whole draft.
    pub async fn create(
        &self,
        requester: &Requester,
        draft: ConfigurationDraft,
    ) -> ServiceResult<Configuration> {
        validation::validate_name("name", &draft.name)?;
        let components = self.check_line_items(&draft.components).await?;
        let total = pricing::compute_total(&draft.components);

        let now = Utc::now();
        let configuration = Configuration {
            id: generate_id(),
            user_id: requester.id.clone(),
            name: draft.name,
            description: draft.description,
            components: draft.components,
            total_cost_cents: total.cents(),
            is_public: draft.is_public,
            tags: draft.tags,
            created_at: now,
            updated_at: now,
        };

        // Inserts the row and the owner back-reference in one transaction
        self.db.configurations().insert(&configuration).await?;

        info!(
            id = %configuration.id,
            user_id = %requester.id,
            total = %total,
            items = components.len(),
            "Configuration created"
        );
        Ok(configuration)
    }

    /// Fetches a configuration; owner-or-admin gated.
    ///
    /// Existence is not hidden: an unknown id is `NotFound` even for a
    /// foreign requester, an existing foreign record is `Authorization`.
    pub async fn get(&self, id: &str, requester: &Requester) -> ServiceResult<Configuration> {
        let configuration = self
            .db
            .configurations()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Configuration", id))?;

        access::require_owner_or_admin(requester, &configuration.user_id)?;
        Ok(configuration)
    }

    /// Applies a partial update; owner-or-admin gated.
    ///
    /// Whenever `components` changes, referential integrity is re-checked
    /// and the total recomputed unconditionally.
    pub async fn update(
        &self,
        id: &str,
        requester: &Requester,
        changes: ConfigurationChanges,
    ) -> ServiceResult<Configuration> {
        let mut configuration = self.get(id, requester).await?;

        if let Some(name) = changes.name {
            validation::validate_name("name", &name)?;
            configuration.name = name;
        }
        if let Some(description) = changes.description {
            configuration.description = description;
        }
        if let Some(is_public) = changes.is_public {
            configuration.is_public = is_public;
        }
        if let Some(tags) = changes.tags {
            configuration.tags = tags;
        }
        if let Some(components) = changes.components {
            self.check_line_items(&components).await?;
            configuration.total_cost_cents = pricing::compute_total(&components).cents();
            configuration.components = components;
        }

        configuration.updated_at = Utc::now();
        self.db.configurations().update(&configuration).await?;

        debug!(id = %configuration.id, "Configuration updated");
        Ok(configuration)
    }

    /// Deletes a configuration and the owner's back-reference to it;
    /// owner-or-admin gated.
    pub async fn delete(&self, id: &str, requester: &Requester) -> ServiceResult<()> {
        let configuration = self.get(id, requester).await?;

        // Removes the row and the owner back-reference in one transaction
        self.db.configurations().delete(&configuration.id).await?;

        info!(id = %configuration.id, user_id = %configuration.user_id, "Configuration deleted");
        Ok(())
    }

    /// Lists a user's configurations, newest first; owner-or-admin gated.
    pub async fn list_for_user(
        &self,
        requester: &Requester,
        owner_id: &str,
    ) -> ServiceResult<Vec<Configuration>> {
        access::require_owner_or_admin(requester, owner_id)?;
        Ok(self.db.configurations().list_for_user(owner_id).await?)
    }

    /// Lists configurations across all users; admin only.
    pub async fn list_all(
        &self,
        requester: &Requester,
        owner_filter: Option<&str>,
        limit: u32,
        offset: u32,
    ) -> ServiceResult<Vec<Configuration>> {
        access::require_admin(requester)?;
        Ok(self
            .db
            .configurations()
            .list_all(owner_filter, limit, offset)
            .await?)
    }

    /// Per-line price breakdown plus the stored total.
    ///
    /// Unit prices come from the stored snapshots; component titles are
    /// resolved from the catalog, falling back to the raw id when a
    /// component has since been removed.
    pub async fn price_breakdown(
        &self,
        id: &str,
        requester: &Requester,
    ) -> ServiceResult<PriceBreakdown> {
        let configuration = self.get(id, requester).await?;
        let catalog = self.load_components(&configuration.components).await?;

        let lines = configuration
            .components
            .iter()
            .map(|item| {
                let title = catalog
                    .iter()
                    .find(|c| c.id == item.component_id)
                    .map(|c| c.title.clone())
                    .unwrap_or_else(|| item.component_id.clone());
                BreakdownLine {
                    component_id: item.component_id.clone(),
                    title,
                    unit_price: item.price(),
                    quantity: item.quantity,
                    subtotal: item.line_total(),
                }
            })
            .collect();

        Ok(PriceBreakdown {
            lines,
            total: configuration.total_cost(),
        })
    }

    /// Fully-resolved view: component title/brand/category and partner
    /// names alongside the snapshot prices. Consumed by external document
    /// renderers; rendering itself happens elsewhere.
    pub async fn populate(
        &self,
        id: &str,
        requester: &Requester,
    ) -> ServiceResult<PopulatedConfiguration> {
        let configuration = self.get(id, requester).await?;
        let catalog = self.load_components(&configuration.components).await?;

        let owner_name = self
            .db
            .users()
            .get_by_id(&configuration.user_id)
            .await?
            .map(|u| u.name)
            .unwrap_or_default();

        let mut lines = Vec::with_capacity(configuration.components.len());
        for item in &configuration.components {
            let component = catalog.iter().find(|c| c.id == item.component_id);

            let category_name = match component {
                Some(c) => self
                    .db
                    .categories()
                    .get_by_id(&c.category_id)
                    .await?
                    .map(|cat| cat.name)
                    .unwrap_or_default(),
                None => String::new(),
            };

            let partner_name = match &item.selected_partner_id {
                Some(partner_id) => self
                    .db
                    .partners()
                    .get_by_id(partner_id)
                    .await?
                    .map(|p| p.name),
                None => None,
            };

            lines.push(PopulatedLine {
                component_id: item.component_id.clone(),
                title: component
                    .map(|c| c.title.clone())
                    .unwrap_or_else(|| item.component_id.clone()),
                brand: component.map(|c| c.brand.clone()).unwrap_or_default(),
                model: component.map(|c| c.model.clone()).unwrap_or_default(),
                category_name,
                partner_name,
                unit_price: item.price(),
                quantity: item.quantity,
                subtotal: item.line_total(),
            });
        }

        Ok(PopulatedConfiguration {
            configuration,
            owner_name,
            lines,
        })
    }

    /// Validates line items and resolves every referenced component and
    /// selected partner. Returns the resolved components.
    async fn check_line_items(&self, items: &[LineItem]) -> ServiceResult<Vec<Component>> {
        pricing::validate_line_items(items)?;

        let mut component_ids: Vec<String> =
            items.iter().map(|i| i.component_id.clone()).collect();
        component_ids.sort();
        component_ids.dedup();

        let found = self.db.components().find_by_ids(&component_ids).await?;
        if found.len() != component_ids.len() {
            let missing = component_ids
                .iter()
                .find(|id| !found.iter().any(|c| &c.id == *id))
                .cloned()
                .unwrap_or_default();
            return Err(ServiceError::referential("Component", missing));
        }

        let mut partner_ids: Vec<&String> = items
            .iter()
            .filter_map(|i| i.selected_partner_id.as_ref())
            .collect();
        partner_ids.sort();
        partner_ids.dedup();

        for partner_id in partner_ids {
            if !self.db.partners().exists(partner_id).await? {
                return Err(ServiceError::referential("Partner", partner_id.clone()));
            }
        }

        Ok(found)
    }

    /// Batch-loads the components referenced by line items; missing ones
    /// are simply absent from the result.
    async fn load_components(&self, items: &[LineItem]) -> ServiceResult<Vec<Component>> {
        let mut ids: Vec<String> = items.iter().map(|i| i.component_id.clone()).collect();
        ids.sort();
        ids.dedup();
        Ok(self.db.components().find_by_ids(&ids).await?)
    }
}
