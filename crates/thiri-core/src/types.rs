//! # Domain Types
//!
//! Core domain types used throughout Thiri POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌─────────────────┐  ┌──────────────────┐  ┌──────────────────┐   │
//! │  │      Item       │  │    SaleRecord    │  │  PurchaseRecord  │   │
//! │  │  ─────────────  │  │  ──────────────  │  │  ──────────────  │   │
//! │  │  id (i64)       │  │  id (i64)        │  │  id (i64)        │   │
//! │  │  name           │  │  lines (frozen)  │  │  name            │   │
//! │  │  prices (cents) │  │  subtotal/tax/   │  │  quantity        │   │
//! │  │  stock          │  │  total (cents)   │  │  total/unit      │   │
//! │  └─────────────────┘  └──────────────────┘  └──────────────────┘   │
//! │                                                                     │
//! │  ┌─────────────────┐  ┌──────────────────┐                         │
//! │  │    TaxRate      │  │     Settings     │                         │
//! │  │  ─────────────  │  │  ──────────────  │                         │
//! │  │  bps (u32)      │  │  currency        │                         │
//! │  │  500 = 5%       │  │  tax_rate_bps    │                         │
//! │  └─────────────────┘  └──────────────────┘                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Weak History Link
//! Sale and purchase records carry denormalized copies of item data (name,
//! prices). They reference items by name only for stock reconciliation,
//! a lookup that may legitimately find nothing after a rename or delete.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::money::Money;
use crate::LOW_STOCK_THRESHOLD;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 500 bps = 5%; integer bps keeps tax math exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
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

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Item
// =============================================================================

/// A stocked product with purchase/sale prices and a quantity on hand.
///
/// Items are mutated in place: by edits, by purchase stock-increases, by
/// sale stock-decreases, and by purchase-deletion rollbacks. Deleting an
/// item never touches historical records, which keep their own copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier. Clock-derived by default, so roughly ordered by
    /// creation time; uniqueness is what actually matters.
    pub id: i64,

    /// Display name. Also the (weak) key purchase records match against.
    pub name: String,

    /// What the shop paid per unit, in cents.
    pub purchase_price_cents: i64,

    /// What the shop charges per unit, in cents.
    pub sale_price_cents: i64,

    /// Units on hand. See `StockPolicy` for whether decrements may take
    /// this negative.
    pub stock: i64,
}

impl Item {
    /// Returns the sale price as a Money type.
    #[inline]
    pub fn sale_price(&self) -> Money {
        Money::from_cents(self.sale_price_cents)
    }

    /// Returns the purchase price as a Money type.
    #[inline]
    pub fn purchase_price(&self) -> Money {
        Money::from_cents(self.purchase_price_cents)
    }

    /// Case-insensitive name match, used to reconcile purchase records
    /// against the item collection. Folds case Unicode-aware, so accented
    /// and non-Latin names link the same way ASCII ones do.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }

    /// Whether the item is at or below the low-stock threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock <= LOW_STOCK_THRESHOLD
    }
}

// =============================================================================
// Item Draft
// =============================================================================

/// Caller-supplied fields for creating or overwriting an item.
///
/// Used by both create and edit: an edit is a full overwrite of the mutable
/// fields, not an incremental adjustment (stock included).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    pub name: String,

    /// Optional; an absent purchase price defaults to 0.
    pub purchase_price_cents: Option<i64>,

    pub sale_price_cents: i64,

    pub stock: i64,
}

impl ItemDraft {
    pub fn new(
        name: impl Into<String>,
        purchase_price_cents: Option<i64>,
        sale_price_cents: i64,
        stock: i64,
    ) -> Self {
        ItemDraft {
            name: name.into(),
            purchase_price_cents,
            sale_price_cents,
            stock,
        }
    }
}

// =============================================================================
// Sale Record
// =============================================================================

/// An immutable snapshot of a completed checkout.
///
/// The lines are deep copies of the cart at checkout time, so later cart or
/// item mutation cannot retroactively alter history. A sale record never
/// changes after creation; it can only be deleted, which does NOT restock
/// (sales are final, unlike purchases).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub id: i64,

    /// Frozen cart lines at checkout time.
    pub lines: Vec<CartLine>,

    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,

    pub date: DateTime<Utc>,
}

impl SaleRecord {
    /// Returns the grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Total units across all lines (for history display).
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

// =============================================================================
// Purchase Record
// =============================================================================

/// A log entry of inventory acquired, paired with a stock increment.
///
/// Creation increments the matching item's stock; deletion decrements it
/// again. Edits deliberately do NOT adjust stock: the original delta cannot
/// be safely un-applied and re-applied without knowing the prior state, so
/// the caller is told to reconcile stock manually after an edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    pub id: i64,

    /// Item name as entered; matched case-insensitively against items.
    pub name: String,

    pub quantity: i64,

    /// Total paid for the whole lot, in cents.
    pub total_cents: i64,

    /// `round(total / quantity)`, in cents.
    pub unit_price_cents: i64,

    pub date: DateTime<Utc>,
}

impl PurchaseRecord {
    /// Returns the lot total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Returns the derived unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Pure configuration: currency label and tax rate.
///
/// Applied uniformly to all money displays and to the checkout tax
/// computation. No invariants beyond that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Currency label, rendered after the amount (e.g., "1,000 Ks").
    pub currency: String,

    /// Tax rate in basis points (500 = 5%).
    pub tax_rate_bps: u32,
}

impl Default for Settings {
    /// Kyat with no tax, matching the shop's first-run defaults.
    fn default() -> Self {
        Settings {
            currency: "Ks".to_string(),
            tax_rate_bps: 0,
        }
    }
}

impl Settings {
    /// Returns the configured tax rate.
    #[inline]
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    /// Formats an amount with the configured currency suffix.
    ///
    /// ## Example
    /// ```rust
    /// use thiri_core::money::Money;
    /// use thiri_core::types::Settings;
    ///
    /// let settings = Settings::default();
    /// assert_eq!(settings.format_amount(Money::from_cents(1234)), "12.34 Ks");
    /// ```
    pub fn format_amount(&self, amount: Money) -> String {
        format!("{} {}", amount, self.currency)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(825);
        assert_eq!(rate.bps(), 825);
        assert!((rate.percentage() - 8.25).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        let rate = TaxRate::from_percentage(8.25);
        assert_eq!(rate.bps(), 825);
    }

    #[test]
    fn test_item_name_matching() {
        let item = Item {
            id: 1,
            name: "Green Tea".to_string(),
            purchase_price_cents: 700,
            sale_price_cents: 1000,
            stock: 10,
        };

        assert!(item.matches_name("green tea"));
        assert!(item.matches_name("GREEN TEA"));
        assert!(item.matches_name("  Green Tea  "));
        assert!(!item.matches_name("Green Teas"));
    }

    #[test]
    fn test_item_name_matching_folds_unicode_case() {
        let item = Item {
            id: 1,
            name: "Café Latte".to_string(),
            purchase_price_cents: 700,
            sale_price_cents: 1000,
            stock: 5,
        };

        assert!(item.matches_name("CAFÉ LATTE"));
        assert!(item.matches_name("café latte"));
        assert!(!item.matches_name("Cafe Latte"));
    }

    #[test]
    fn test_item_low_stock() {
        let mut item = Item {
            id: 1,
            name: "Green Tea".to_string(),
            purchase_price_cents: 700,
            sale_price_cents: 1000,
            stock: 6,
        };
        assert!(!item.is_low_stock());

        item.stock = 5;
        assert!(item.is_low_stock());
    }

    #[test]
    fn test_settings_default_and_format() {
        let settings = Settings::default();
        assert_eq!(settings.currency, "Ks");
        assert!(settings.tax_rate().is_zero());
        assert_eq!(settings.format_amount(Money::from_cents(150000)), "1500.00 Ks");
    }
}
