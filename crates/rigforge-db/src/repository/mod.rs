//! # Repository Module
//!
//! Database repository implementations for rigforge.
//!
//! ## Repository Pattern
//! ```text
//! Service call
//!      │  db.components().find_by_ids(&ids)
//!      ▼
//! ComponentRepository
//! ├── find_by_ids(&self, ids)
//! ├── get_by_id(&self, id)
//! ├── insert(&self, component)
//! └── update(&self, component)
//!      │  SQL
//!      ▼
//! SQLite
//! ```
//!
//! Repositories are read/write accessors with no business rules: validation,
//! authorization, slug and total computation all happen above them in
//! rigforge-service. Embedded aggregates (partner prices, line items) are
//! (de)serialized here from their JSON columns.
//!
//! ## Available Repositories
//!
//! - [`category::CategoryRepository`] - Category CRUD
//! - [`component::ComponentRepository`] - Component CRUD, filtered listing,
//!   batch lookup for referential checks
//! - [`partner::PartnerRepository`] - Partner CRUD
//! - [`user::UserRepository`] - User CRUD
//! - [`configuration::ConfigurationRepository`] - Configuration CRUD,
//!   ownership-scoped listings, transactional owner back-reference upkeep

pub mod category;
pub mod component;
pub mod configuration;
pub mod partner;
pub mod user;

/// Generates a fresh entity or sub-item id.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
