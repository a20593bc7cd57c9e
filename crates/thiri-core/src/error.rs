//! # Error Types
//!
//! Domain-specific error types for thiri-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  thiri-core errors (this file)                                      │
//! │  ├── LedgerError      - Stock/cart rule violations                  │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  thiri-store errors (separate crate)                                │
//! │  └── StoreError       - Persistence failures                        │
//! │                                                                     │
//! │  Flow: ValidationError → LedgerError → caller displays message      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item name, quantities, etc.)
//! 3. Errors are enum variants, never String
//! 4. A stale id (edit/delete of something already gone) is NOT an error:
//!    those operations report a no-op through their return value instead,
//!    so the caller can tolerate out-of-date views

use thiserror::Error;

// =============================================================================
// Ledger Error
// =============================================================================

/// Ledger rule violations.
///
/// Every variant aborts the operation that raised it with no partial
/// mutation; the caller surfaces the message and retries with changed input.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A cart line would exceed the item's current stock.
    ///
    /// ## When This Occurs
    /// - Raising a line's quantity above what is on hand
    /// - Adding an item whose stock is zero
    ///
    /// ## User Workflow
    /// ```text
    /// Tap "+" on Green Tea (stock: 3, in cart: 3)
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Green Tea", available: 3, requested: 4 }
    ///      │
    ///      ▼
    /// UI shows: "Only 3 Green Tea in stock"; cart line unchanged
    /// ```
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Checkout requires at least one cart line.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cart has exceeded the maximum number of distinct lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds the maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller-supplied fields don't meet requirements.
/// Used for early validation before any collection is touched.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with LedgerError.
pub type LedgerResult<T> = Result<T, LedgerError>;

// =============================================================================
// Unit Tests
// =============================================================================
