//! # mandi-core: Pure Domain Layer for the Mandi Catalog
//!
//! This crate holds the domain types and rules of the multi-shop catalog as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Mandi Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               Callers (HTTP API, admin tools)                   │   │
//! │  │    list / detail / create / stock / soft-delete requests        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ mandi-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ validation│  │   error   │  │   │
//! │  │   │  Product  │  │   Money   │  │   rules   │  │ Validation│  │   │
//! │  │   │ Inventory │  │  (cents)  │  │  checks   │  │   Error   │  │   │
//! │  │   │   Shop    │  │           │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    mandi-db (Database Layer)                    │   │
//! │  │         SQLite queries, migrations, catalog repositories        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, InventoryRecord, Shop, query rows)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Storage-contract validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use mandi_core::money::Money;
//! use mandi_core::types::ProductListQuery;
//!
//! // Create money from cents (never from floats!)
//! let price = Money::from_cents(1099); // $10.99
//!
//! // Out-of-range paging is clamped, not rejected
//! let query = ProductListQuery {
//!     page: Some(0),
//!     limit: Some(9999),
//!     ..Default::default()
//! };
//! assert_eq!(query.normalized_page(), 1);
//! assert_eq!(query.normalized_limit(), 100);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use mandi_core::Money` instead of
// `use mandi_core::money::Money`

pub use error::ValidationError;
pub use money::Money;
pub use types::*;
pub use validation::ValidationResult;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of product and shop names, in characters.
///
/// ## Why a constant?
/// SQLite TEXT columns carry no length cap of their own; the 255-character
/// contract lives here so callers can surface the limit in their own forms
/// without consulting the database.
pub const MAX_NAME_LEN: usize = 255;

/// Maximum length of a product image URL, in characters.
pub const MAX_IMAGE_URL_LEN: usize = 500;
