//! # Validation Module
//!
//! Input validation utilities for the Mandi catalog.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Caller (API / admin tool)                                    │
//! │  ├── Business-rule checks (price ≥ 0, units, permissions)              │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Repository entry (Rust)                                      │
//! │  └── THIS MODULE: storage-contract checks, before any SQL runs         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  ├── Partial UNIQUE index (one active inventory row per pair)          │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use mandi_core::validation::validate_product_name;
//!
//! // Validate before database insert
//! validate_product_name("Basmati Rice 5kg").unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::{NewProduct, ProductPatch};
use crate::{MAX_IMAGE_URL_LEN, MAX_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 255 characters
///
/// ## Example
/// ```rust
/// use mandi_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Basmati Rice 5kg").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a shop name.
///
/// Same caps as product names.
pub fn validate_shop_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates an image URL.
///
/// ## Rules
/// - Maximum 500 characters
/// - No scheme/format checks; the URL is opaque to the storage layer
pub fn validate_image_url(url: &str) -> ValidationResult<()> {
    if url.len() > MAX_IMAGE_URL_LEN {
        return Err(ValidationError::TooLong {
            field: "image_url".to_string(),
            max: MAX_IMAGE_URL_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates a product creation input as a whole.
///
/// Price non-negativity is the caller's contract and is not re-checked here.
pub fn validate_new_product(input: &NewProduct) -> ValidationResult<()> {
    validate_product_name(&input.name)?;

    if let Some(url) = input.image_url.as_deref() {
        validate_image_url(url)?;
    }

    Ok(())
}

/// Validates a product patch.
///
/// ## Rules
/// - At least one field must be set (an empty patch is a caller bug, and
///   rejecting it here means no statement is ever built for it)
/// - A new name must satisfy the same caps as at creation
pub fn validate_patch(patch: &ProductPatch) -> ValidationResult<()> {
    if patch.is_empty() {
        return Err(ValidationError::EmptyUpdate);
    }

    if let Some(name) = patch.name.as_deref() {
        validate_product_name(name)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Basmati Rice 5kg").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());

        // Boundary: exactly 255 passes, 256 fails.
        assert!(validate_product_name(&"A".repeat(255)).is_ok());
        assert!(validate_product_name(&"A".repeat(256)).is_err());
    }

    #[test]
    fn test_validate_shop_name() {
        assert!(validate_shop_name("Saddar Branch").is_ok());
        assert!(validate_shop_name("").is_err());
        assert!(validate_shop_name(&"B".repeat(256)).is_err());
    }

    #[test]
    fn test_validate_image_url() {
        assert!(validate_image_url("https://cdn.example.com/p/rice.jpg").is_ok());
        assert!(validate_image_url("").is_ok());

        // Boundary: exactly 500 passes, 501 fails.
        assert!(validate_image_url(&"x".repeat(500)).is_ok());
        assert!(validate_image_url(&"x".repeat(501)).is_err());
    }

    #[test]
    fn test_validate_new_product() {
        let input = NewProduct {
            name: "Basmati Rice 5kg".to_string(),
            description: None,
            base_price: Money::from_cents(99_900),
            image_url: Some("https://cdn.example.com/p/rice.jpg".to_string()),
        };
        assert!(validate_new_product(&input).is_ok());

        let bad = NewProduct {
            name: "".to_string(),
            ..input.clone()
        };
        assert!(validate_new_product(&bad).is_err());

        let bad = NewProduct {
            image_url: Some("x".repeat(501)),
            ..input
        };
        assert!(validate_new_product(&bad).is_err());
    }

    #[test]
    fn test_validate_patch() {
        assert_eq!(
            validate_patch(&ProductPatch::default()),
            Err(ValidationError::EmptyUpdate)
        );

        let patch = ProductPatch {
            base_price: Some(Money::from_cents(1099)),
            ..Default::default()
        };
        assert!(validate_patch(&patch).is_ok());

        // Clearing the description alone is a valid patch.
        let patch = ProductPatch {
            description: Some(None),
            ..Default::default()
        };
        assert!(validate_patch(&patch).is_ok());

        let patch = ProductPatch {
            name: Some("".to_string()),
            ..Default::default()
        };
        assert!(validate_patch(&patch).is_err());
    }
}
