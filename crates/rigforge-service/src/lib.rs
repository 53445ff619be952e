//! # RigForge Service Layer
//!
//! Orchestration layer for the RigForge catalog-and-pricing backend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       RigForge Services                             │
//! │                                                                     │
//! │  ┌──────────────────┐  ┌─────────────────┐  ┌──────────────────┐   │
//! │  │ ConfigurationSvc │  │  CatalogService │  │   UserService    │   │
//! │  │                  │  │                 │  │                  │   │
//! │  │ • create/update  │  │ • category CRUD │  │ • list / get     │   │
//! │  │ • delete / get   │  │ • component CRUD│  │ • update         │   │
//! │  │ • price breakdown│  │ • partner CRUD  │  │ • cascade delete │   │
//! │  │ • populated view │  │ • partner prices│  │                  │   │
//! │  └──────────────────┘  └─────────────────┘  └──────────────────┘   │
//! │                                                                     │
//! │  ┌──────────────────────────────────────────────────────────────┐  │
//! │  │                      Infrastructure                          │  │
//! │  │                                                              │  │
//! │  │  rigforge-core (pure logic)      rigforge-db (SQLite/sqlx)   │  │
//! │  │  • pricing engine                • repositories              │  │
//! │  │  • access gates                  • embedded migrations       │  │
//! │  │  • validation, slugs             • connection pool           │  │
//! │  └──────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutating or single-resource operation takes a [`Requester`] and
//! runs the relevant access gate before touching storage. Transport layers
//! (HTTP, RPC) and credential verification live outside this workspace.
//!
//! ## Configuration
//! Environment variables:
//! - `RIGFORGE_DATABASE_PATH` - SQLite file path (default: ./rigforge.db)
//! - `RIGFORGE_DB_MAX_CONNECTIONS` - pool size (default: 5)
//! - `RIGFORGE_DEFAULT_PAGE_SIZE` - listing page size (default: 20)
//! - `RIGFORGE_MAX_PAGE_SIZE` - listing page cap (default: 100)

pub mod config;
pub mod error;
pub mod services;

// Re-exports
pub use config::{ConfigError, ServiceConfig};
pub use error::{ServiceError, ServiceResult};
pub use services::catalog_service::CatalogService;
pub use services::configuration_service::ConfigurationService;
pub use services::user_service::UserService;

pub use rigforge_core::Requester;
