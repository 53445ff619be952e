//! # Pricing Engine
//!
//! Computes a configuration's total cost from its line items.
//!
//! ## Snapshot price policy
//! ```text
//! User selects "Intel Core i9 @ 599.99 from LDLC"
//!      │
//!      ▼
//! LineItem { price_cents: 59999 }   ← price frozen at selection time
//!      │
//!      ▼
//! compute_total(items)              ← sums snapshots, never re-reads the
//!      │                              catalog
//!      ▼
//! total_cost_cents: 59999
//! ```
//! Catalog prices fluctuate across partners and time; a configuration must
//! remain reproducible and auditable. What the user saw and selected is
//! what is reported, even if the catalog price later changes.
//!
//! ## Recompute, never patch
//! The total is recomputed from scratch whenever the line-item sequence
//! changes. There is no incremental bookkeeping to drift out of sync.

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::LineItem;
use crate::{MAX_CONFIGURATION_ITEMS, MAX_ITEM_QUANTITY};

/// Validates a submitted line-item sequence.
///
/// ## Rules
/// - At least one line item (an empty build is rejected)
/// - At most [`MAX_CONFIGURATION_ITEMS`] items
/// - Every component reference non-empty
/// - Every snapshot price >= 0
/// - Every quantity in 1..=[`MAX_ITEM_QUANTITY`]
///
/// Referential existence of the component ids is checked separately against
/// the catalog store; this function is pure.
pub fn validate_line_items(items: &[LineItem]) -> Result<(), ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::Empty {
            field: "components".to_string(),
        });
    }

    if items.len() > MAX_CONFIGURATION_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "components".to_string(),
            min: 1,
            max: MAX_CONFIGURATION_ITEMS as i64,
        });
    }

    for item in items {
        if item.component_id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "component".to_string(),
            });
        }

        if item.price_cents < 0 {
            return Err(ValidationError::OutOfRange {
                field: "price".to_string(),
                min: 0,
                max: i64::MAX,
            });
        }

        if item.quantity < 1 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            });
        }

        if item.quantity > MAX_ITEM_QUANTITY {
            return Err(ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 1,
                max: MAX_ITEM_QUANTITY,
            });
        }
    }

    Ok(())
}

/// Computes the total cost of a line-item sequence.
///
/// `total == Σ snapshot_price × quantity`. Uses the stored snapshot prices,
/// never a live catalog lookup.
///
/// ## Example
/// ```rust
/// use rigforge_core::pricing::compute_total;
/// use rigforge_core::types::LineItem;
///
/// let items = vec![LineItem {
///     component_id: "c1".to_string(),
///     selected_partner_id: None,
///     price_cents: 59999,
///     quantity: 2,
/// }];
/// assert_eq!(compute_total(&items).cents(), 119998);
/// ```
pub fn compute_total(items: &[LineItem]) -> Money {
    items.iter().map(LineItem::line_total).sum()
}

// =============================================================================
// Unit Tests
// =============================================================================
