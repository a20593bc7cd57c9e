//! # Cart
//!
//! The transient, uncommitted set of lines for the sale currently being
//! built. The cart exists only between the first add-to-cart and
//! checkout/clear; it never mutates item stock. Stock is committed at
//! checkout, all at once.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Cart Operations                               │
//! │                                                                     │
//! │  User Action              Ledger Call            Cart Change        │
//! │  ───────────              ───────────            ───────────        │
//! │                                                                     │
//! │  Tap item tile ─────────► add_to_cart(id, +1) ─► line qty +1        │
//! │                                                                     │
//! │  Tap "-" on line ───────► add_to_cart(id, -1) ─► line qty -1        │
//! │                           (qty reaches 0 ──────► line removed)      │
//! │                                                                     │
//! │  Tap clear ─────────────► clear_cart() ────────► lines.clear()      │
//! │                                                                     │
//! │  Tap checkout ──────────► checkout(rate) ──────► snapshot + clear   │
//! │                                                                     │
//! │  INVARIANT: a line's quantity never exceeds the item's current      │
//! │  stock at the moment of the adjustment.                             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::money::Money;
use crate::types::{Item, TaxRate};
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// A line in the cart.
///
/// ## Design Notes
/// - `item_id` references the item for the checkout stock decrement
/// - name and prices are frozen copies taken when the line is created,
///   so the cart (and any sale record snapshotted from it) displays
///   consistent data even if the item is edited afterwards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Item id (for the checkout stock decrement).
    pub item_id: i64,

    /// Item name at time of adding (frozen).
    pub name: String,

    /// Sale price in cents at time of adding (frozen).
    pub sale_price_cents: i64,

    /// Purchase price in cents at time of adding (frozen, kept for
    /// profit reporting over sale history).
    pub purchase_price_cents: i64,

    /// Quantity in cart; always > 0 while the line exists.
    pub quantity: i64,
}

impl CartLine {
    /// Creates a new line from an item, freezing its display data.
    fn from_item(item: &Item) -> Self {
        CartLine {
            item_id: item.id,
            name: item.name.clone(),
            sale_price_cents: item.sale_price_cents,
            purchase_price_cents: item.purchase_price_cents,
            quantity: 1,
        }
    }

    /// Line total (unit sale price × quantity).
    pub fn line_total_cents(&self) -> i64 {
        self.sale_price_cents * self.quantity
    }

    /// Returns the unit sale price as Money.
    #[inline]
    pub fn sale_price(&self) -> Money {
        Money::from_cents(self.sale_price_cents)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The sale in progress.
///
/// ## Invariants
/// - Lines are unique by `item_id` (adjusting the same item changes the
///   existing line)
/// - Quantity is always > 0 (an adjustment to 0 or below removes the line)
/// - A quantity never exceeds the item's stock at adjustment time
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adjusts the quantity of an item's line by `delta`, creating or
    /// removing the line as needed.
    ///
    /// ## Behavior
    /// - Existing line: quantity becomes `quantity + delta`; capped by the
    ///   item's current stock; a result of 0 or below removes the line
    /// - No line yet: a positive `delta` opens the line at quantity 1
    ///   (matching the tap-to-add workflow); requires stock on hand
    /// - Item stock itself is never touched here
    ///
    /// ## Errors
    /// - [`LedgerError::InsufficientStock`] if the resulting quantity would
    ///   exceed the item's current stock (the line is left unchanged)
    /// - [`LedgerError::QuantityTooLarge`] / [`LedgerError::CartTooLarge`]
    ///   on the hard caps
    pub fn adjust(&mut self, item: &Item, delta: i64) -> LedgerResult<()> {
        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item.id) {
            let new_qty = line.quantity + delta;

            if new_qty <= 0 {
                self.lines.retain(|l| l.item_id != item.id);
                return Ok(());
            }
            if new_qty > item.stock {
                return Err(LedgerError::InsufficientStock {
                    name: item.name.clone(),
                    available: item.stock,
                    requested: new_qty,
                });
            }
            if new_qty > MAX_LINE_QUANTITY {
                return Err(LedgerError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_LINE_QUANTITY,
                });
            }

            line.quantity = new_qty;
            return Ok(());
        }

        // No line yet: only a positive adjustment opens one.
        if delta <= 0 {
            return Ok(());
        }
        if item.stock <= 0 {
            return Err(LedgerError::InsufficientStock {
                name: item.name.clone(),
                available: item.stock,
                requested: 1,
            });
        }
        if self.lines.len() >= MAX_CART_LINES {
            return Err(LedgerError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        self.lines.push(CartLine::from_item(item));
        Ok(())
    }

    /// Returns the line for an item id, if present.
    pub fn line(&self, item_id: i64) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.item_id == item_id)
    }

    /// All lines, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Subtotal (before tax).
    pub fn subtotal_cents(&self) -> i64 {
        self.lines.iter().map(|l| l.line_total_cents()).sum()
    }

    /// Tax on the subtotal at the given rate.
    ///
    /// Tax applies to the subtotal as a whole, not per line.
    pub fn tax_cents(&self, rate: TaxRate) -> i64 {
        Money::from_cents(self.subtotal_cents())
            .calculate_tax(rate)
            .cents()
    }

    /// Grand total (subtotal + tax) at the given rate.
    pub fn total_cents(&self, rate: TaxRate) -> i64 {
        self.subtotal_cents() + self.tax_cents(rate)
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
