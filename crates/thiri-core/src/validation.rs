//! # Validation Module
//!
//! Input validation for ledger operations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Presentation (forms)                                      │
//! │  ├── Basic format checks (empty, numeric)                           │
//! │  └── Immediate user feedback                                        │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE (ledger boundary)                             │
//! │  ├── Required fields and ranges                                     │
//! │  └── A failure here aborts the operation with NO mutation           │
//! │                                                                     │
//! │  Defense in depth: the ledger never trusts the form layer           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item (or purchase record) name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
///
/// ## Returns
/// The trimmed name.
///
/// ## Example
/// ```rust
/// use thiri_core::validation::validate_name;
///
/// assert_eq!(validate_name("  Green Tea ").unwrap(), "Green Tea");
/// assert!(validate_name("").is_err());
/// assert!(validate_name("   ").is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    // Counted in characters, not bytes: multi-byte scripts (Burmese item
    // names in practice) must get the same 200 as ASCII.
    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(name.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a purchase quantity.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a price or amount in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free or not-yet-priced items)
///
/// ## Example
/// ```rust
/// use thiri_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents("salePrice", 1099).is_ok());
/// assert!(validate_price_cents("salePrice", 0).is_ok());
/// assert!(validate_price_cents("salePrice", -100).is_err());
/// ```
pub fn validate_price_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
///
/// The upper bound is a deliberate policy choice: no sales tax exceeds
/// 100%, and the likeliest way to get there is entering a bps value
/// where a percentage was meant (e.g. 500 for 500%). Rejecting it at
/// checkout catches that misconfiguration before it prices a sale.
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "taxRate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("Green Tea").unwrap(), "Green Tea");
        assert_eq!(validate_name("  padded  ").unwrap(), "padded");

        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_name_counts_characters_not_bytes() {
        // 100 three-byte characters: well under 200 chars, over 200 bytes.
        let name = "န".repeat(100);
        assert_eq!(validate_name(&name).unwrap(), name);

        assert!(validate_name(&"န".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents("salePrice", 0).is_ok());
        assert!(validate_price_cents("salePrice", 1099).is_ok());
        assert!(validate_price_cents("salePrice", -100).is_err());
    }

    #[test]
    fn test_validate_tax_rate_bps() {
        assert!(validate_tax_rate_bps(0).is_ok());
        assert!(validate_tax_rate_bps(825).is_ok());
        assert!(validate_tax_rate_bps(10000).is_ok());
        assert!(validate_tax_rate_bps(10001).is_err());
    }
}
