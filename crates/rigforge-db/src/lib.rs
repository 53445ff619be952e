//! # rigforge-db: Database Layer for RigForge
//!
//! This crate provides database access for the RigForge catalog-and-pricing
//! backend. It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       RigForge Data Flow                            │
//! │                                                                     │
//! │  Service call (ConfigurationService::create)                        │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                   rigforge-db (THIS CRATE)                  │   │
//! │  │                                                             │   │
//! │  │   ┌──────────────┐   ┌────────────────┐   ┌─────────────┐  │   │
//! │  │   │   Database   │   │  Repositories  │   │ Migrations  │  │   │
//! │  │   │   (pool.rs)  │   │ (component.rs) │   │ (embedded)  │  │   │
//! │  │   │              │   │                │   │             │  │   │
//! │  │   │ SqlitePool   │   │ CategoryRepo   │   │ 001_initial │  │   │
//! │  │   │ Connection   │◄──│ ComponentRepo  │   │ _schema.sql │  │   │
//! │  │   │ Management   │   │ UserRepo  ...  │   │             │  │   │
//! │  │   └──────────────┘   └────────────────┘   └─────────────┘  │   │
//! │  │                                                             │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │                        SQLite Database                              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (category, component, ...)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rigforge_db::{Database, DbConfig};
//!
//! // Create database with migrations applied
//! let db = Database::new(DbConfig::new("path/to/rigforge.db")).await?;
//!
//! // Use repositories
//! let found = db.components().find_by_ids(&ids).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::category::CategoryRepository;
pub use repository::component::{ComponentFilter, ComponentRepository};
pub use repository::configuration::ConfigurationRepository;
pub use repository::partner::PartnerRepository;
pub use repository::user::{UserFilter, UserRepository};
