//! # Domain Types
//!
//! Core domain types used throughout rigforge.
//!
//! ## Type Hierarchy
//! ```text
//! Catalog side                        User side
//! ────────────                        ─────────
//! Category ◄── Component              User ◄── Configuration
//!               └─ PartnerPrice[]            └─ LineItem[]
//! Partner ◄─────┘
//! ```
//!
//! ## Embedded sequences
//! `Component::partner_prices` and `Configuration::components` are owned
//! ordered lists inside their parent aggregate, not separate entities.
//! Partner prices carry their own stable id for targeted update/removal.
//!
//! ## Snapshot pricing
//! A line item stores the price the user saw at selection time. Totals are
//! computed from those snapshots, never from a live catalog lookup, so a
//! configuration stays reproducible when catalog prices move.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Commission Rate
// =============================================================================

/// Affiliate commission rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 500 bps = 5% (a typical affiliate rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionRate(u32);

impl CommissionRate {
    /// Creates a commission rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        CommissionRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero commission.
    #[inline]
    pub const fn zero() -> Self {
        CommissionRate(0)
    }
}

impl Default for CommissionRate {
    fn default() -> Self {
        CommissionRate::zero()
    }
}

// =============================================================================
// Role
// =============================================================================

/// Authorization role attached to a user identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular user: owns and manages their own configurations.
    User,
    /// Administrator: manages the catalog and any user's records.
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

impl Role {
    /// Checks whether this role carries the admin capability.
    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

// =============================================================================
// Category
// =============================================================================

/// A hardware category (CPU, GPU, RAM, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name, unique across categories.
    pub name: String,

    /// URL-safe identifier derived from the name. Recomputed whenever the
    /// name changes; uniqueness mirrors name uniqueness.
    pub slug: String,

    /// Optional description.
    pub description: Option<String>,

    /// Optional icon reference.
    pub icon: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Component
// =============================================================================

/// One specification entry on a component (name/value, order preserved).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specification {
    pub name: String,
    pub value: String,
}

/// A merchant offer for a component, embedded in the component aggregate.
///
/// Each entry has its own stable id so it can be updated or removed without
/// touching its siblings. Concurrent edits are last-write-wins at this
/// granularity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerPrice {
    /// Sub-identifier, stable for the lifetime of the entry.
    pub id: String,

    /// Partner offering this price.
    pub partner_id: String,

    /// Offer price in cents.
    pub price_cents: i64,

    /// Product page at the partner.
    pub url: Option<String>,

    /// Whether the partner currently has stock.
    pub in_stock: bool,

    /// Refreshed on every edit of this entry.
    pub last_updated: DateTime<Utc>,
}

impl PartnerPrice {
    /// Returns the offer price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// A hardware component in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub id: String,

    /// Owning category (required reference).
    pub category_id: String,

    pub brand: String,
    pub title: String,
    pub model: String,
    pub description: Option<String>,

    /// Ordered technical specifications.
    pub specifications: Vec<Specification>,

    /// Optional image reference.
    pub image: Option<String>,

    /// Reference/list price in cents. Partner offers vary around this.
    pub base_price_cents: i64,

    /// Independently-managed merchant offers.
    pub partner_prices: Vec<PartnerPrice>,

    /// Soft-delete flag.
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Component {
    /// Returns the base price as Money.
    #[inline]
    pub fn base_price(&self) -> Money {
        Money::from_cents(self.base_price_cents)
    }

    /// Finds an embedded partner price by its sub-identifier.
    pub fn partner_price(&self, price_id: &str) -> Option<&PartnerPrice> {
        self.partner_prices.iter().find(|p| p.id == price_id)
    }
}

// =============================================================================
// Partner
// =============================================================================

/// Affiliate program terms for a partner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AffiliateProgram {
    /// Commission in basis points (0..=10000).
    pub commission_rate_bps: u32,

    /// Free-form program terms.
    pub terms: Option<String>,

    /// Identifier under the partner's program.
    pub affiliate_id: Option<String>,
}

impl AffiliateProgram {
    /// Returns the commission rate as a typed value.
    #[inline]
    pub fn commission_rate(&self) -> CommissionRate {
        CommissionRate::from_bps(self.commission_rate_bps)
    }
}

/// A merchant partner whose prices appear on components.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Partner {
    pub id: String,

    /// Display name, unique across partners.
    pub name: String,

    /// Must match `http(s)://...`.
    pub website: String,

    pub logo: Option<String>,

    pub affiliate: AffiliateProgram,

    pub is_active: bool,

    /// Validated address, stored lowercase.
    pub contact_email: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Partner {
    /// Commission owed to this site for a purchase of `amount` at the partner.
    pub fn commission_on(&self, amount: Money) -> Money {
        amount.commission(self.affiliate.commission_rate_bps)
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Default quantity when a submitted line item omits it.
fn default_quantity() -> i64 {
    1
}

/// One priced component selection inside a configuration.
///
/// `price_cents` is a snapshot taken at selection time (see module docs).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Referenced component (must exist at creation time).
    pub component_id: String,

    /// Partner the user chose to buy from, if any.
    pub selected_partner_id: Option<String>,

    /// Snapshot price in cents, >= 0.
    pub price_cents: i64,

    /// Units of this component, >= 1. Defaults to 1 when omitted.
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

impl LineItem {
    /// Returns the snapshot unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Line total: snapshot price times quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price().multiply_quantity(self.quantity)
    }
}

/// A user-authored bundle of priced component selections (one PC build).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    pub id: String,

    /// Owning user (required reference).
    pub user_id: String,

    pub name: String,
    pub description: Option<String>,

    /// Ordered line items, embedded in this aggregate.
    pub components: Vec<LineItem>,

    /// Derived: always equals the sum of line totals. Recomputed on every
    /// create/update, never patched incrementally.
    pub total_cost_cents: i64,

    /// Whether the build is visible to other users.
    pub is_public: bool,

    pub tags: Vec<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Configuration {
    /// Returns the stored total as Money.
    #[inline]
    pub fn total_cost(&self) -> Money {
        Money::from_cents(self.total_cost_cents)
    }
}

// =============================================================================
// User
// =============================================================================

/// An account in the system.
///
/// The password is stored only as an irreversible hash; credential issuance
/// and verification belong to the external auth collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,

    /// Unique, validated, stored lowercase.
    pub email: String,

    /// Argon2 hash. Never serialized to API-facing views.
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub role: Role,

    /// Back-references to configurations owned by this user. Maintained
    /// bidirectionally: create appends, delete removes.
    pub configuration_ids: Vec<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
