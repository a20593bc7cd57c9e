//! # thiri-core: Pure Ledger Engine for Thiri POS
//!
//! This crate is the **heart** of Thiri POS. It contains the inventory/ledger
//! consistency model as pure functions with zero I/O dependencies: the rules
//! that keep stock counts, purchase records, and sale records mutually
//! consistent as items are added, edited, sold, purchased, and deleted.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Thiri POS Architecture                         │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                  Presentation Layer (any UI)                │   │
//! │  │   Item forms ──► Sales grid ──► Cart ──► History lists      │   │
//! │  └───────────────────────────┬─────────────────────────────────┘   │
//! │                              │ engine calls + re-read              │
//! │  ┌───────────────────────────▼─────────────────────────────────┐   │
//! │  │               ★ thiri-core (THIS CRATE) ★                   │   │
//! │  │                                                             │   │
//! │  │  ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌────────────┐     │   │
//! │  │  │  types   │ │  money   │ │   cart   │ │ validation │     │   │
//! │  │  │  Item    │ │  Money   │ │  Cart    │ │   rules    │     │   │
//! │  │  │  records │ │  TaxRate │ │ CartLine │ │   checks   │     │   │
//! │  │  └──────────┘ └──────────┘ └──────────┘ └────────────┘     │   │
//! │  │                     ┌──────────┐                            │   │
//! │  │                     │  ledger  │  all stock-adjustment      │   │
//! │  │                     │  Ledger  │  rules live here           │   │
//! │  │                     └──────────┘                            │   │
//! │  │                                                             │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS        │   │
//! │  └───────────────────────────┬─────────────────────────────────┘   │
//! │                              │                                     │
//! │  ┌───────────────────────────▼─────────────────────────────────┐   │
//! │  │                thiri-store (Persistence Layer)              │   │
//! │  │          JSON key-value files, commit() boundary            │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, SaleRecord, PurchaseRecord, Settings)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The transient sale-in-progress
//! - [`ledger`] - The Ledger state object and every mutating operation
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Explicit state**: all operations are methods on a [`ledger::Ledger`]
//!    value; there is no global mutable state
//! 2. **No I/O**: persistence is a collaborator, never a dependency
//! 3. **Integer Money**: all monetary values are in cents (i64)
//! 4. **Explicit Errors**: typed errors, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use thiri_core::ledger::{Ledger, SequentialIds};
//! use thiri_core::types::{ItemDraft, TaxRate};
//!
//! let mut ledger = Ledger::with_ids(Box::new(SequentialIds::new()));
//!
//! let id = ledger
//!     .create_item(ItemDraft::new("Green Tea", Some(700), 1000, 12))
//!     .unwrap()
//!     .id;
//!
//! ledger.add_to_cart(id, 1).unwrap();
//! let sale = ledger.checkout(TaxRate::from_bps(500)).unwrap();
//! assert_eq!(sale.total_cents, 1050); // 10.00 + 5% tax
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod ledger;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use thiri_core::Money` instead of
// `use thiri_core::money::Money`

pub use cart::{Cart, CartLine};
pub use error::{LedgerError, ValidationError};
pub use ledger::Ledger;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable transaction sizes.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line in the cart
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Stock level at or below which an item is considered low on stock.
///
/// The presentation layer highlights these items; the threshold is a
/// display convention inherited from the shop's existing workflow.
pub const LOW_STOCK_THRESHOLD: i64 = 5;
