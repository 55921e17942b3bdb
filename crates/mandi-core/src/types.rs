//! # Domain Types
//!
//! Core domain types for the Mandi catalog.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │ InventoryRecord │   │      Shop       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  product_id     │   │  id (UUID)      │   │  shop_id (UUID) │       │
//! │  │  name           │   │  shop_id (FK)   │   │  name           │       │
//! │  │  base_price     │   │  product_id(FK) │   │  is_active      │       │
//! │  │  is_deleted     │   │  stock_quantity │   │  is_deleted     │       │
//! │  └─────────────────┘   │  selling_price  │   └─────────────────┘       │
//! │                        │  is_deleted     │                              │
//! │                        └─────────────────┘                              │
//! │                                                                         │
//! │  One active inventory row per (shop_id, product_id); soft-deleted       │
//! │  rows stay behind as history and never surface in reads.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Soft-Delete Pattern
//! Every table carries `is_deleted` + `deleted_at`. Rows are never hard
//! deleted; every read predicate filters on `is_deleted = 0`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Paging Constants
// =============================================================================

/// Page size applied when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upper bound on page size; larger requests are clamped, not rejected.
pub const MAX_PAGE_SIZE: u32 = 100;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
///
/// The product row is shop-agnostic: per-shop stock and selling price live
/// in [`InventoryRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub product_id: String,

    /// Display name shown in listings and on labels.
    pub name: String,

    /// Optional long-form description.
    pub description: Option<String>,

    /// Catalog base price in cents (smallest currency unit).
    pub base_price_cents: i64,

    /// Optional image location for storefront display.
    pub image_url: Option<String>,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was soft-deleted, if ever.
    pub deleted_at: Option<DateTime<Utc>>,

    /// Soft-delete flag; deleted products are invisible to every read.
    pub is_deleted: bool,
}

impl Product {
    /// Returns the base price as a Money type.
    #[inline]
    pub fn base_price(&self) -> Money {
        Money::from_cents(self.base_price_cents)
    }
}

// =============================================================================
// Inventory Record
// =============================================================================

/// One shop's stock of one product.
///
/// At most one *active* record may exist per `(shop_id, product_id)`;
/// soft-deleted records accumulate as history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InventoryRecord {
    pub id: String,
    pub shop_id: String,
    pub product_id: String,
    /// On-hand quantity; never negative (enforced by a CHECK constraint).
    pub stock_quantity: i64,
    /// Shop-specific selling price in cents; may differ from the base price.
    pub selling_price_cents: i64,
    /// Unit of sale ("kg", "pcs", "dozen", ...).
    pub unit: String,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl InventoryRecord {
    /// Returns the shop's selling price as a Money type.
    #[inline]
    pub fn selling_price(&self) -> Money {
        Money::from_cents(self.selling_price_cents)
    }

    /// Checks whether any stock is on hand.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }
}

// =============================================================================
// Shop
// =============================================================================

/// A physical or virtual shop carrying inventory.
///
/// `is_active` is an operational toggle (shop closed for renovation);
/// `is_deleted` is the soft-delete flag. Only active, non-deleted shops
/// participate in catalog listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Shop {
    pub shop_id: String,
    pub name: String,
    pub is_active: bool,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Query Result Rows
// =============================================================================

/// One listing row: a product as stocked by one shop.
///
/// The paginated listing joins products to active inventory and active
/// shops, so a product stocked in three shops produces three rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ShopProductRow {
    pub product_id: String,
    pub name: String,
    pub description: Option<String>,
    pub base_price_cents: i64,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Shop carrying this product.
    pub shop_id: String,
    pub shop_name: String,
    /// That shop's stock and price.
    pub stock_quantity: i64,
    pub selling_price_cents: i64,
    pub unit: String,
}

impl ShopProductRow {
    /// Returns the catalog base price as a Money type.
    #[inline]
    pub fn base_price(&self) -> Money {
        Money::from_cents(self.base_price_cents)
    }

    /// Returns the shop's selling price as a Money type.
    #[inline]
    pub fn selling_price(&self) -> Money {
        Money::from_cents(self.selling_price_cents)
    }
}

/// A single product with its (optional) presence in one shop.
///
/// Produced by the shop-scoped detail lookup. The product columns are
/// always populated; the inventory and shop columns are `None` when the
/// shop has no active record for the product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductDetail {
    pub product_id: String,
    pub name: String,
    pub description: Option<String>,
    pub base_price_cents: i64,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Active inventory record id in the requested shop, if any.
    pub inventory_id: Option<String>,
    pub shop_id: Option<String>,
    pub shop_name: Option<String>,
    pub stock_quantity: Option<i64>,
    pub selling_price_cents: Option<i64>,
    pub unit: Option<String>,
}

impl ProductDetail {
    /// Returns the catalog base price as a Money type.
    #[inline]
    pub fn base_price(&self) -> Money {
        Money::from_cents(self.base_price_cents)
    }

    /// Returns the shop's selling price, when the shop stocks the product.
    #[inline]
    pub fn selling_price(&self) -> Option<Money> {
        self.selling_price_cents.map(Money::from_cents)
    }

    /// Checks whether the requested shop has an active inventory record.
    #[inline]
    pub fn stocked_in_shop(&self) -> bool {
        self.inventory_id.is_some()
    }
}

/// Availability of one product in one shop.
///
/// A read-only snapshot; nothing is reserved or decremented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    /// An active inventory record exists for the pair.
    pub exists: bool,
    /// Stock is on hand (`stock_quantity > 0`).
    pub available: bool,
    pub stock_quantity: i64,
}

// =============================================================================
// Pagination
// =============================================================================

/// Page metadata returned alongside listing results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Total matching rows across all pages.
    pub total: i64,
    /// 1-based page number actually served.
    pub page: u32,
    /// Page size actually applied (after clamping).
    pub limit: u32,
    /// `ceil(total / limit)`; zero when nothing matched.
    pub total_pages: u32,
}

impl Pagination {
    /// Builds page metadata from a row count and a normalized window.
    pub fn new(total: i64, page: u32, limit: u32) -> Self {
        let total_pages = if total <= 0 {
            0
        } else {
            ((total + limit as i64 - 1) / limit as i64) as u32
        };
        Pagination {
            total,
            page,
            limit,
            total_pages,
        }
    }
}

/// One page of catalog listing results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub items: Vec<ShopProductRow>,
    pub pagination: Pagination,
}

// =============================================================================
// Listing Query
// =============================================================================

/// Parameters for the paginated catalog listing.
///
/// Every field is optional; [`normalized_page`](Self::normalized_page) and
/// [`normalized_limit`](Self::normalized_limit) apply defaults and clamp
/// out-of-range values instead of rejecting them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductListQuery {
    /// 1-based page number; defaults to 1, values below 1 are coerced to 1.
    pub page: Option<u32>,
    /// Page size; defaults to 20, clamped to [1, 100].
    pub limit: Option<u32>,
    /// Case-insensitive substring match on product name or description.
    pub search: Option<String>,
    /// Restrict to products stocked by this shop.
    pub shop_id: Option<String>,
}

impl ProductListQuery {
    /// The page that will actually be served (always ≥ 1).
    pub fn normalized_page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// The page size that will actually be applied (always in [1, 100]).
    pub fn normalized_limit(&self) -> u32 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    /// Row offset of the served page.
    pub fn offset(&self) -> i64 {
        (self.normalized_page() as i64 - 1) * self.normalized_limit() as i64
    }

    /// SQL LIKE pattern for the search term, if one was given.
    pub fn like_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(|term| format!("%{}%", term.trim()))
    }
}

// =============================================================================
// Write Inputs
// =============================================================================

/// Input for creating a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub base_price: Money,
    pub image_url: Option<String>,
}

/// Partial update for a product.
///
/// Absent fields are left unchanged. `description` nests two Options so the
/// caller can distinguish "leave as is" (`None`) from "clear to NULL"
/// (`Some(None)`) at compile time. Built in Rust by callers; intentionally
/// not serde-derived because flat JSON cannot express the distinction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub base_price: Option<Money>,
}

impl ProductPatch {
    /// True when no field is set; such a patch is a caller-contract error.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.base_price.is_none()
    }
}

/// Input for stocking a product in a shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInventory {
    pub stock_quantity: i64,
    pub selling_price: Money,
    pub unit: String,
}

/// Input for creating a shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewShop {
    pub name: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults() {
        let query = ProductListQuery::default();
        assert_eq!(query.normalized_page(), 1);
        assert_eq!(query.normalized_limit(), DEFAULT_PAGE_SIZE);
        assert_eq!(query.offset(), 0);
        assert_eq!(query.like_pattern(), None);
    }

    #[test]
    fn test_query_clamping() {
        let query = ProductListQuery {
            page: Some(0),
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(query.normalized_page(), 1);
        assert_eq!(query.normalized_limit(), 1);

        let query = ProductListQuery {
            page: Some(3),
            limit: Some(10_000),
            ..Default::default()
        };
        assert_eq!(query.normalized_page(), 3);
        assert_eq!(query.normalized_limit(), MAX_PAGE_SIZE);
        assert_eq!(query.offset(), 2 * MAX_PAGE_SIZE as i64);
    }

    #[test]
    fn test_query_like_pattern_trims() {
        let query = ProductListQuery {
            search: Some("  rice ".to_string()),
            ..Default::default()
        };
        assert_eq!(query.like_pattern().as_deref(), Some("%rice%"));
    }

    #[test]
    fn test_pagination_math() {
        let p = Pagination::new(0, 1, 20);
        assert_eq!(p.total_pages, 0);

        let p = Pagination::new(1, 1, 20);
        assert_eq!(p.total_pages, 1);

        let p = Pagination::new(20, 1, 20);
        assert_eq!(p.total_pages, 1);

        let p = Pagination::new(21, 1, 20);
        assert_eq!(p.total_pages, 2);

        let p = Pagination::new(41, 3, 20);
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.page, 3);
        assert_eq!(p.limit, 20);
    }

    #[test]
    fn test_patch_emptiness() {
        assert!(ProductPatch::default().is_empty());

        let patch = ProductPatch {
            name: Some("Basmati Rice".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());

        // Clearing the description counts as a change.
        let patch = ProductPatch {
            description: Some(None),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_pagination_serde_shape() {
        let p = Pagination::new(41, 2, 20);
        let json = serde_json::to_value(p).unwrap();
        assert_eq!(json["total"], 41);
        assert_eq!(json["page"], 2);
        assert_eq!(json["limit"], 20);
        assert_eq!(json["total_pages"], 3);
    }

    #[test]
    fn test_in_stock() {
        let record = InventoryRecord {
            id: "inv-1".to_string(),
            shop_id: "shop-1".to_string(),
            product_id: "prod-1".to_string(),
            stock_quantity: 5,
            selling_price_cents: 1099,
            unit: "pcs".to_string(),
            is_deleted: false,
            deleted_at: None,
            created_at: Utc::now(),
        };
        assert!(record.in_stock());
        assert_eq!(record.selling_price(), Money::from_cents(1099));

        let empty = InventoryRecord {
            stock_quantity: 0,
            ..record
        };
        assert!(!empty.in_stock());
    }
}
