//! # rigforge-core: Pure Business Logic for rigforge
//!
//! This crate is the **heart** of rigforge, a catalog-and-pricing backend
//! for assembling custom PC configurations. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │             Transport layer (HTTP, out of scope)                │
//! └─────────────────────────────┬───────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────▼───────────────────────────────────┐
//! │                     rigforge-service                            │
//! │    configuration manager, catalog admin, user admin             │
//! └─────────────────────────────┬───────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────▼───────────────────────────────────┐
//! │                ★ rigforge-core (THIS CRATE) ★                   │
//! │                                                                 │
//! │   ┌─────────┐ ┌───────┐ ┌─────────┐ ┌────────┐ ┌────────────┐  │
//! │   │  types  │ │ money │ │ pricing │ │ access │ │ validation │  │
//! │   └─────────┘ └───────┘ └─────────┘ └────────┘ └────────────┘  │
//! │                                                                 │
//! │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │
//! └─────────────────────────────┬───────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────▼───────────────────────────────────┐
//! │                  rigforge-db (Database Layer)                   │
//! │           SQLite queries, migrations, repositories              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Category, Component, Partner, Configuration, User)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Line-item validation and total computation
//! - [`slug`] - Deterministic slug derivation for categories
//! - [`access`] - Authorization gates (admin, ownership-or-admin)
//! - [`validation`] - Field-level validation rules
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function is deterministic
//! 2. **No I/O**: database, network and file system access are forbidden here
//! 3. **Integer Money**: all monetary values are in cents (i64)
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod access;
pub mod error;
pub mod money;
pub mod pricing;
pub mod slug;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use rigforge_core::Money` instead of
// `use rigforge_core::money::Money`

pub use access::Requester;
pub use error::{AccessError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items allowed in a single configuration.
///
/// ## Business Reason
/// A PC build with more than a hundred distinct parts is a data-entry
/// mistake, not a build. Keeps serialized aggregates bounded.
pub const MAX_CONFIGURATION_ITEMS: usize = 100;

/// Maximum quantity of a single line item.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;
