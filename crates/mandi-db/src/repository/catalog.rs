//! # Catalog Repository
//!
//! Database operations for products and per-shop inventory.
//!
//! ## Key Operations
//! - Paginated, searchable listing across the three-table join
//! - Single-product lookup (bare, or with one shop's inventory attached)
//! - Inventory stocking with duplicate-pair detection
//! - Transactional multi-table soft-delete
//!
//! ## Soft-Delete Visibility
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Who sees what after a soft delete                       │
//! │                                                                         │
//! │  products p ──┬── INNER JOIN inventory i ──┬── INNER JOIN shops s      │
//! │               │                            │                            │
//! │  p.is_deleted = 0          i.is_deleted = 0         s.is_deleted = 0   │
//! │                                                     s.is_active  = 1   │
//! │                                                                         │
//! │  Listing + availability require ALL of the above.                      │
//! │  Detail lookup LEFT JOINs inventory/shop instead: a live product       │
//! │  with no active record in the requested shop still comes back,         │
//! │  with the inventory columns as NULL.                                   │
//! │                                                                         │
//! │  soft_delete_product flips the product row AND its active inventory    │
//! │  rows inside one transaction - readers never see a half-deleted        │
//! │  product.                                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use mandi_core::validation::{validate_new_product, validate_patch};
use mandi_core::{
    Availability, InventoryRecord, NewInventory, NewProduct, Pagination, Product, ProductDetail,
    ProductListQuery, ProductPage, ProductPatch, ShopProductRow,
};

/// Product columns in the order the entity struct declares them.
/// Shared by every query that materializes a full `Product`.
const PRODUCT_COLUMNS: &str =
    "product_id, name, description, base_price_cents, image_url, created_at, deleted_at, is_deleted";

/// Repository for product and inventory database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CatalogRepository::new(pool);
///
/// // Paginated listing
/// let page = repo.list_products(&ProductListQuery::default()).await?;
///
/// // Availability for one shop
/// let avail = repo.check_availability("product-uuid", "shop-uuid").await?;
/// ```
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Lists products with pagination, optional search, and optional shop filter.
    ///
    /// ## How It Works
    /// 1. Normalizes the paging window (page ≥ 1, limit in [1, 100])
    /// 2. Counts *distinct* matching products for the pagination metadata
    /// 3. Fetches one page of joined rows, newest products first
    ///
    /// Both queries share the same predicate: live product, active inventory,
    /// live and active shop, plus the optional shop filter and the optional
    /// case-insensitive substring match on name or description.
    ///
    /// ## Row Shape
    /// One row per product-per-shop match - a product stocked in three shops
    /// contributes three rows but counts once in `pagination.total`.
    ///
    /// ## Arguments
    /// * `query` - Paging window and filters; out-of-range values are clamped
    ///
    /// ## Example
    /// ```rust,ignore
    /// let page = repo
    ///     .list_products(&ProductListQuery {
    ///         search: Some("rice".to_string()),
    ///         ..Default::default()
    ///     })
    ///     .await?;
    /// ```
    pub async fn list_products(&self, query: &ProductListQuery) -> DbResult<ProductPage> {
        let page = query.normalized_page();
        let limit = query.normalized_limit();
        let offset = query.offset();
        let like = query.like_pattern();

        debug!(
            page,
            limit,
            search = ?query.search,
            shop_id = ?query.shop_id,
            "Listing products"
        );

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(DISTINCT p.product_id)
            FROM products p
            INNER JOIN inventory i ON i.product_id = p.product_id
            INNER JOIN shops s ON s.shop_id = i.shop_id
            WHERE p.is_deleted = 0
              AND i.is_deleted = 0
              AND s.is_deleted = 0
              AND s.is_active = 1
              AND (?1 IS NULL OR i.shop_id = ?1)
              AND (?2 IS NULL OR p.name LIKE ?2 OR p.description LIKE ?2)
            "#,
        )
        .bind(query.shop_id.as_deref())
        .bind(like.as_deref())
        .fetch_one(&self.pool)
        .await?;

        let items = sqlx::query_as::<_, ShopProductRow>(
            r#"
            SELECT
                p.product_id,
                p.name,
                p.description,
                p.base_price_cents,
                p.image_url,
                p.created_at,
                s.shop_id,
                s.name AS shop_name,
                i.stock_quantity,
                i.selling_price_cents,
                i.unit
            FROM products p
            INNER JOIN inventory i ON i.product_id = p.product_id
            INNER JOIN shops s ON s.shop_id = i.shop_id
            WHERE p.is_deleted = 0
              AND i.is_deleted = 0
              AND s.is_deleted = 0
              AND s.is_active = 1
              AND (?1 IS NULL OR i.shop_id = ?1)
              AND (?2 IS NULL OR p.name LIKE ?2 OR p.description LIKE ?2)
            ORDER BY p.created_at DESC
            LIMIT ?3 OFFSET ?4
            "#,
        )
        .bind(query.shop_id.as_deref())
        .bind(like.as_deref())
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = items.len(), total, "Listing returned rows");

        Ok(ProductPage {
            items,
            pagination: Pagination::new(total, page, limit),
        })
    }

    /// Gets a live product by its ID, without inventory context.
    ///
    /// ## Arguments
    /// * `product_id` - Product UUID
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found and not deleted
    /// * `Ok(None)` - Missing or soft-deleted
    pub async fn get_product_by_id(&self, product_id: &str) -> DbResult<Option<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE product_id = ?1 AND is_deleted = 0"
        );

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Gets a live product together with one shop's view of it.
    ///
    /// LEFT JOINs the shop's active inventory record and the shop row, so a
    /// product the shop does not stock still comes back with the inventory
    /// columns as `None`. A record pointing at a soft-deleted shop drops the
    /// whole row instead.
    ///
    /// ## Returns
    /// * `Ok(Some(ProductDetail))` - Product is live (stocked or not)
    /// * `Ok(None)` - Product missing or soft-deleted
    pub async fn get_product_in_shop(
        &self,
        product_id: &str,
        shop_id: &str,
    ) -> DbResult<Option<ProductDetail>> {
        let detail = sqlx::query_as::<_, ProductDetail>(
            r#"
            SELECT
                p.product_id,
                p.name,
                p.description,
                p.base_price_cents,
                p.image_url,
                p.created_at,
                i.id AS inventory_id,
                i.shop_id,
                s.name AS shop_name,
                i.stock_quantity,
                i.selling_price_cents,
                i.unit
            FROM products p
            LEFT JOIN inventory i
                ON i.product_id = p.product_id
                AND i.shop_id = ?2
                AND i.is_deleted = 0
            LEFT JOIN shops s ON s.shop_id = i.shop_id
            WHERE p.product_id = ?1
              AND p.is_deleted = 0
              AND (s.is_deleted = 0 OR s.shop_id IS NULL)
            "#,
        )
        .bind(product_id)
        .bind(shop_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(detail)
    }

    /// Inserts a new product.
    ///
    /// Applies the storage contract first (name non-empty and ≤ 255 chars,
    /// image URL ≤ 500 chars); business rules such as price non-negativity
    /// are the caller's responsibility.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The materialized row, with generated id and timestamp
    /// * `Err(DbError::Validation)` - Contract violation, nothing inserted
    pub async fn create_product(&self, input: &NewProduct) -> DbResult<Product> {
        validate_new_product(input)?;

        debug!(name = %input.name, "Creating product");

        let product = Product {
            product_id: generate_product_id(),
            name: input.name.clone(),
            description: input.description.clone(),
            base_price_cents: input.base_price.cents(),
            image_url: input.image_url.clone(),
            created_at: Utc::now(),
            deleted_at: None,
            is_deleted: false,
        };

        sqlx::query(
            r#"
            INSERT INTO products (
                product_id, name, description, base_price_cents,
                image_url, created_at, deleted_at, is_deleted
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&product.product_id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.base_price_cents)
        .bind(&product.image_url)
        .bind(product.created_at)
        .bind(product.deleted_at)
        .bind(product.is_deleted)
        .execute(&self.pool)
        .await?;

        Ok(product)
    }

    /// Applies a partial update to a live product.
    ///
    /// Only the fields present in the patch enter the statement; absent
    /// fields are left untouched. `description: Some(None)` clears the
    /// column to NULL.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - The updated row
    /// * `Ok(None)` - No live product matched (missing or already deleted)
    /// * `Err(DbError::Validation)` - Empty patch or bad field value; no
    ///   statement was issued
    pub async fn update_product(
        &self,
        product_id: &str,
        patch: &ProductPatch,
    ) -> DbResult<Option<Product>> {
        validate_patch(patch)?;

        debug!(product_id = %product_id, "Updating product");

        // Build the SET clause from the present fields only; binds below
        // must follow the same order.
        let mut sets: Vec<&str> = Vec::new();
        if patch.name.is_some() {
            sets.push("name = ?");
        }
        if patch.description.is_some() {
            sets.push("description = ?");
        }
        if patch.base_price.is_some() {
            sets.push("base_price_cents = ?");
        }

        let sql = format!(
            "UPDATE products SET {} WHERE product_id = ? AND is_deleted = 0 \
             RETURNING {PRODUCT_COLUMNS}",
            sets.join(", ")
        );

        let mut query = sqlx::query_as::<_, Product>(&sql);
        if let Some(name) = &patch.name {
            query = query.bind(name);
        }
        if let Some(description) = &patch.description {
            query = query.bind(description.as_deref());
        }
        if let Some(price) = patch.base_price {
            query = query.bind(price.cents());
        }

        let updated = query.bind(product_id).fetch_optional(&self.pool).await?;

        Ok(updated)
    }

    /// Stocks a product in a shop.
    ///
    /// ## Arguments
    /// * `shop_id` - Shop UUID
    /// * `product_id` - Product UUID
    /// * `input` - Stock level, shop price, and unit of sale
    ///
    /// ## Returns
    /// * `Ok(InventoryRecord)` - The materialized active record
    /// * `Err(DbError::Conflict)` - The shop already has an active record for
    ///   this product (the partial unique index fired)
    pub async fn add_inventory(
        &self,
        shop_id: &str,
        product_id: &str,
        input: &NewInventory,
    ) -> DbResult<InventoryRecord> {
        debug!(shop_id = %shop_id, product_id = %product_id, "Adding inventory");

        let record = InventoryRecord {
            id: generate_inventory_id(),
            shop_id: shop_id.to_string(),
            product_id: product_id.to_string(),
            stock_quantity: input.stock_quantity,
            selling_price_cents: input.selling_price.cents(),
            unit: input.unit.clone(),
            is_deleted: false,
            deleted_at: None,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO inventory (
                id, shop_id, product_id, stock_quantity,
                selling_price_cents, unit, is_deleted, deleted_at, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&record.id)
        .bind(&record.shop_id)
        .bind(&record.product_id)
        .bind(record.stock_quantity)
        .bind(record.selling_price_cents)
        .bind(&record.unit)
        .bind(record.is_deleted)
        .bind(record.deleted_at)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|err| match DbError::from(err) {
            DbError::Conflict(_) => DbError::Conflict(format!(
                "product {} is already in shop {}'s inventory",
                product_id, shop_id
            )),
            other => other,
        })?;

        Ok(record)
    }

    /// Checks whether a shop has a product on hand.
    ///
    /// Requires a live product, an active inventory record, and a live,
    /// active shop; pure read, never reserves or decrements stock.
    ///
    /// ## Returns
    /// * `Ok(Some(Availability))` - The pair exists; `available` reflects
    ///   whether `stock_quantity > 0`
    /// * `Ok(None)` - No active pairing under an active shop
    pub async fn check_availability(
        &self,
        product_id: &str,
        shop_id: &str,
    ) -> DbResult<Option<Availability>> {
        let stock: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT i.stock_quantity
            FROM inventory i
            INNER JOIN products p ON p.product_id = i.product_id AND p.is_deleted = 0
            INNER JOIN shops s
                ON s.shop_id = i.shop_id
                AND s.is_deleted = 0
                AND s.is_active = 1
            WHERE i.product_id = ?1
              AND i.shop_id = ?2
              AND i.is_deleted = 0
            "#,
        )
        .bind(product_id)
        .bind(shop_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(stock.map(|stock_quantity| Availability {
            exists: true,
            available: stock_quantity > 0,
            stock_quantity,
        }))
    }

    /// Soft-deletes a product and all its active inventory rows, atomically.
    ///
    /// ## Transaction Shape
    /// ```text
    /// BEGIN
    ///   UPDATE inventory SET is_deleted = 1, deleted_at = now
    ///     WHERE product_id = ? AND is_deleted = 0        -- any row count
    ///   UPDATE products  SET is_deleted = 1, deleted_at = now
    ///     WHERE product_id = ? AND is_deleted = 0        -- 0 or 1 rows
    /// COMMIT
    /// ```
    /// Any error before commit drops the transaction, which rolls everything
    /// back; the original error is re-raised unmodified.
    ///
    /// ## Returns
    /// * `Ok(true)` - The product was live and is now deleted, along with its
    ///   previously-active inventory
    /// * `Ok(false)` - Missing or already deleted; the (no-op) inventory pass
    ///   still commits
    pub async fn soft_delete_product(&self, product_id: &str) -> DbResult<bool> {
        debug!(product_id = %product_id, "Soft-deleting product");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        // Inventory first, unconditionally - even when the product row turns
        // out to be missing or already deleted.
        sqlx::query(
            "UPDATE inventory SET is_deleted = 1, deleted_at = ?2 \
             WHERE product_id = ?1 AND is_deleted = 0",
        )
        .bind(product_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query(
            "UPDATE products SET is_deleted = 1, deleted_at = ?2 \
             WHERE product_id = ?1 AND is_deleted = 0",
        )
        .bind(product_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts live products (for diagnostics).
    pub async fn count_products(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE is_deleted = 0")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Generates a unique product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generates a unique inventory record ID.
pub fn generate_inventory_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use mandi_core::{Money, NewShop, Shop, ValidationError};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_shop(db: &Database, name: &str) -> Shop {
        db.shops()
            .create_shop(&NewShop {
                name: name.to_string(),
            })
            .await
            .unwrap()
    }

    async fn seed_product(db: &Database, name: &str, cents: i64) -> Product {
        db.catalog()
            .create_product(&NewProduct {
                name: name.to_string(),
                description: Some(format!("{} description", name)),
                base_price: Money::from_cents(cents),
                image_url: None,
            })
            .await
            .unwrap()
    }

    async fn stock(db: &Database, shop: &Shop, product: &Product, qty: i64) -> InventoryRecord {
        db.catalog()
            .add_inventory(
                &shop.shop_id,
                &product.product_id,
                &NewInventory {
                    stock_quantity: qty,
                    selling_price: Money::from_cents(1099),
                    unit: "pcs".to_string(),
                },
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_product_materializes_row() {
        let db = test_db().await;

        let created = db
            .catalog()
            .create_product(&NewProduct {
                name: "Basmati Rice 5kg".to_string(),
                description: None,
                base_price: Money::from_cents(99_900),
                image_url: Some("https://cdn.example.com/p/rice.jpg".to_string()),
            })
            .await
            .unwrap();

        assert!(!created.is_deleted);
        assert!(created.deleted_at.is_none());
        assert_eq!(created.base_price(), Money::from_cents(99_900));

        let fetched = db
            .catalog()
            .get_product_by_id(&created.product_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_product_rejects_contract_violations() {
        let db = test_db().await;

        let err = db
            .catalog()
            .create_product(&NewProduct {
                name: "   ".to_string(),
                description: None,
                base_price: Money::from_cents(100),
                image_url: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        let err = db
            .catalog()
            .create_product(&NewProduct {
                name: "Valid".to_string(),
                description: None,
                base_price: Money::from_cents(100),
                image_url: Some("x".repeat(501)),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        // Nothing was inserted on either attempt.
        assert_eq!(db.catalog().count_products().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_clamps_page_and_limit() {
        let db = test_db().await;
        let shop = seed_shop(&db, "Main").await;
        for i in 0..3 {
            let p = seed_product(&db, &format!("Product {}", i), 500).await;
            stock(&db, &shop, &p, 5).await;
        }

        let page = db
            .catalog()
            .list_products(&ProductListQuery {
                page: Some(0),
                limit: Some(0),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.pagination.page, 1);
        assert_eq!(page.pagination.limit, 1);
        assert_eq!(page.items.len(), 1);

        let page = db
            .catalog()
            .list_products(&ProductListQuery {
                limit: Some(10_000),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.pagination.limit, 100);
    }

    #[tokio::test]
    async fn test_list_pagination_math() {
        let db = test_db().await;
        let shop = seed_shop(&db, "Main").await;
        for i in 0..5 {
            let p = seed_product(&db, &format!("Product {}", i), 500).await;
            stock(&db, &shop, &p, 1).await;
        }

        let first = db
            .catalog()
            .list_products(&ProductListQuery {
                page: Some(1),
                limit: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(first.items.len(), 2);
        assert_eq!(first.pagination.total, 5);
        assert_eq!(first.pagination.total_pages, 3);

        let last = db
            .catalog()
            .list_products(&ProductListQuery {
                page: Some(3),
                limit: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(last.items.len(), 1);

        let beyond = db
            .catalog()
            .list_products(&ProductListQuery {
                page: Some(4),
                limit: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.pagination.total, 5);
    }

    #[tokio::test]
    async fn test_list_orders_newest_first() {
        let db = test_db().await;
        let shop = seed_shop(&db, "Main").await;
        for name in ["First", "Second", "Third"] {
            let p = seed_product(&db, name, 500).await;
            stock(&db, &shop, &p, 1).await;
        }

        let page = db
            .catalog()
            .list_products(&ProductListQuery::default())
            .await
            .unwrap();
        let names: Vec<&str> = page.items.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Third", "Second", "First"]);
    }

    #[tokio::test]
    async fn test_list_search_is_case_insensitive() {
        let db = test_db().await;
        let shop = seed_shop(&db, "Main").await;
        let rice = seed_product(&db, "Basmati Rice 5kg", 99_900).await;
        let chilli = seed_product(&db, "Red Chilli Powder", 25_000).await;
        stock(&db, &shop, &rice, 3).await;
        stock(&db, &shop, &chilli, 3).await;

        let page = db
            .catalog()
            .list_products(&ProductListQuery {
                search: Some("RICE".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].product_id, rice.product_id);

        // The description participates too ("Red Chilli Powder description").
        let page = db
            .catalog()
            .list_products(&ProductListQuery {
                search: Some("chilli powder desc".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].product_id, chilli.product_id);
    }

    #[tokio::test]
    async fn test_list_shop_filter_and_row_multiplicity() {
        let db = test_db().await;
        let saddar = seed_shop(&db, "Saddar").await;
        let clifton = seed_shop(&db, "Clifton").await;
        let rice = seed_product(&db, "Basmati Rice 5kg", 99_900).await;
        stock(&db, &saddar, &rice, 3).await;
        stock(&db, &clifton, &rice, 7).await;

        // Unfiltered: one row per shop match, but the product counts once.
        let page = db
            .catalog()
            .list_products(&ProductListQuery::default())
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.pagination.total, 1);

        let page = db
            .catalog()
            .list_products(&ProductListQuery {
                shop_id: Some(saddar.shop_id.clone()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].shop_id, saddar.shop_id);
        assert_eq!(page.items[0].stock_quantity, 3);
        assert_eq!(page.items[0].shop_name, "Saddar");
    }

    #[tokio::test]
    async fn test_get_product_in_shop_modes() {
        let db = test_db().await;
        let stocked_shop = seed_shop(&db, "Stocked").await;
        let empty_shop = seed_shop(&db, "Empty").await;
        let product = seed_product(&db, "Basmati Rice 5kg", 99_900).await;
        let record = stock(&db, &stocked_shop, &product, 4).await;

        let detail = db
            .catalog()
            .get_product_in_shop(&product.product_id, &stocked_shop.shop_id)
            .await
            .unwrap()
            .unwrap();
        assert!(detail.stocked_in_shop());
        assert_eq!(detail.inventory_id.as_deref(), Some(record.id.as_str()));
        assert_eq!(detail.shop_name.as_deref(), Some("Stocked"));
        assert_eq!(detail.stock_quantity, Some(4));
        assert_eq!(detail.selling_price(), Some(Money::from_cents(1099)));

        // The product is live, so the unstocked shop still sees it - with
        // every inventory column as None.
        let detail = db
            .catalog()
            .get_product_in_shop(&product.product_id, &empty_shop.shop_id)
            .await
            .unwrap()
            .unwrap();
        assert!(!detail.stocked_in_shop());
        assert_eq!(detail.name, "Basmati Rice 5kg");
        assert_eq!(detail.shop_name, None);
        assert_eq!(detail.stock_quantity, None);

        assert!(db
            .catalog()
            .get_product_in_shop("no-such-product", &stocked_shop.shop_id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_update_product_partial_fields() {
        let db = test_db().await;
        let product = seed_product(&db, "Old Name", 500).await;

        let updated = db
            .catalog()
            .update_product(
                &product.product_id,
                &ProductPatch {
                    name: Some("New Name".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "New Name");
        // Untouched fields survive.
        assert_eq!(updated.description, product.description);
        assert_eq!(updated.base_price_cents, 500);

        // Some(None) clears the description; a present price changes it.
        let updated = db
            .catalog()
            .update_product(
                &product.product_id,
                &ProductPatch {
                    description: Some(None),
                    base_price: Some(Money::from_cents(750)),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.description, None);
        assert_eq!(updated.base_price_cents, 750);
        assert_eq!(updated.name, "New Name");

        assert!(db
            .catalog()
            .update_product(
                "no-such-product",
                &ProductPatch {
                    name: Some("X".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_update_product_rejects_empty_patch() {
        let db = test_db().await;
        let product = seed_product(&db, "Unchanged", 500).await;

        let err = db
            .catalog()
            .update_product(&product.product_id, &ProductPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::Validation(ValidationError::EmptyUpdate)
        ));

        // No statement ran; the row is untouched.
        let fetched = db
            .catalog()
            .get_product_by_id(&product.product_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched, product);
    }

    #[tokio::test]
    async fn test_duplicate_inventory_is_conflict_not_storage() {
        let db = test_db().await;
        let shop = seed_shop(&db, "Main").await;
        let product = seed_product(&db, "Basmati Rice 5kg", 99_900).await;
        stock(&db, &shop, &product, 5).await;

        let err = db
            .catalog()
            .add_inventory(
                &shop.shop_id,
                &product.product_id,
                &NewInventory {
                    stock_quantity: 9,
                    selling_price: Money::from_cents(1199),
                    unit: "pcs".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_conflict());
        assert!(err.to_string().contains("already in shop"));

        // The partial index only guards *active* rows: after a soft delete
        // the pair can be stocked again.
        assert!(db
            .catalog()
            .soft_delete_product(&product.product_id)
            .await
            .unwrap());
        db.catalog()
            .add_inventory(
                &shop.shop_id,
                &product.product_id,
                &NewInventory {
                    stock_quantity: 2,
                    selling_price: Money::from_cents(1299),
                    unit: "pcs".to_string(),
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_availability_cases() {
        let db = test_db().await;
        let shop = seed_shop(&db, "Main").await;
        let product = seed_product(&db, "Basmati Rice 5kg", 99_900).await;

        // No inventory row yet.
        assert!(db
            .catalog()
            .check_availability(&product.product_id, &shop.shop_id)
            .await
            .unwrap()
            .is_none());

        // Zero stock: the pair exists but nothing is on hand.
        stock(&db, &shop, &product, 0).await;
        let avail = db
            .catalog()
            .check_availability(&product.product_id, &shop.shop_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            avail,
            Availability {
                exists: true,
                available: false,
                stock_quantity: 0
            }
        );

        // An inactive shop drops out of the availability join.
        assert!(db
            .shops()
            .set_shop_active(&shop.shop_id, false)
            .await
            .unwrap());
        assert!(db
            .catalog()
            .check_availability(&product.product_id, &shop.shop_id)
            .await
            .unwrap()
            .is_none());

        // So does a soft-deleted shop.
        assert!(db
            .shops()
            .set_shop_active(&shop.shop_id, true)
            .await
            .unwrap());
        assert!(db.shops().soft_delete_shop(&shop.shop_id).await.unwrap());
        assert!(db
            .catalog()
            .check_availability(&product.product_id, &shop.shop_id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_deleted_product_is_invisible_everywhere() {
        let db = test_db().await;
        let shop = seed_shop(&db, "Main").await;
        let product = seed_product(&db, "Basmati Rice 5kg", 99_900).await;
        stock(&db, &shop, &product, 5).await;

        assert!(db
            .catalog()
            .soft_delete_product(&product.product_id)
            .await
            .unwrap());

        let page = db
            .catalog()
            .list_products(&ProductListQuery::default())
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total, 0);
        assert_eq!(page.pagination.total_pages, 0);

        assert!(db
            .catalog()
            .get_product_by_id(&product.product_id)
            .await
            .unwrap()
            .is_none());
        assert!(db
            .catalog()
            .get_product_in_shop(&product.product_id, &shop.shop_id)
            .await
            .unwrap()
            .is_none());
        assert!(db
            .catalog()
            .check_availability(&product.product_id, &shop.shop_id)
            .await
            .unwrap()
            .is_none());

        // A deleted product is not an update target either.
        assert!(db
            .catalog()
            .update_product(
                &product.product_id,
                &ProductPatch {
                    name: Some("Resurrected".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_soft_delete_product_cascades_and_reports() {
        let db = test_db().await;
        let saddar = seed_shop(&db, "Saddar").await;
        let clifton = seed_shop(&db, "Clifton").await;
        let product = seed_product(&db, "Basmati Rice 5kg", 99_900).await;
        stock(&db, &saddar, &product, 3).await;
        stock(&db, &clifton, &product, 7).await;

        // Missing id: false, nothing mutated.
        assert!(!db
            .catalog()
            .soft_delete_product("no-such-product")
            .await
            .unwrap());
        assert_eq!(db.catalog().count_products().await.unwrap(), 1);

        assert!(db
            .catalog()
            .soft_delete_product(&product.product_id)
            .await
            .unwrap());

        // Every previously-active inventory row is flagged with a timestamp.
        let orphaned: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM inventory \
             WHERE product_id = ?1 AND (is_deleted = 0 OR deleted_at IS NULL)",
        )
        .bind(&product.product_id)
        .fetch_one(db.pool())
        .await
        .unwrap();
        assert_eq!(orphaned, 0);

        // Second delete is a no-op.
        assert!(!db
            .catalog()
            .soft_delete_product(&product.product_id)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_soft_delete_rolls_back_when_product_step_fails() {
        let db = test_db().await;
        let shop = seed_shop(&db, "Main").await;
        let product = seed_product(&db, "Basmati Rice 5kg", 99_900).await;
        stock(&db, &shop, &product, 5).await;

        // Make the product-row update blow up mid-transaction.
        sqlx::query(
            "CREATE TRIGGER block_product_delete \
             BEFORE UPDATE OF is_deleted ON products \
             WHEN NEW.is_deleted = 1 \
             BEGIN SELECT RAISE(ABORT, 'blocked by trigger'); END",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let err = db
            .catalog()
            .soft_delete_product(&product.product_id)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Storage(_)));
        assert!(err.to_string().contains("blocked by trigger"));

        // The inventory pass ran first inside the same transaction; the
        // rollback must have undone it.
        let avail = db
            .catalog()
            .check_availability(&product.product_id, &shop.shop_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(avail.stock_quantity, 5);

        // With the trigger gone the same call succeeds.
        sqlx::query("DROP TRIGGER block_product_delete")
            .execute(db.pool())
            .await
            .unwrap();
        assert!(db
            .catalog()
            .soft_delete_product(&product.product_id)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_end_to_end_catalog_flow() {
        let db = test_db().await;
        let shop = seed_shop(&db, "Shop One").await;

        let product = db
            .catalog()
            .create_product(&NewProduct {
                name: "Widget".to_string(),
                description: None,
                base_price: Money::from_cents(999),
                image_url: None,
            })
            .await
            .unwrap();

        db.catalog()
            .add_inventory(
                &shop.shop_id,
                &product.product_id,
                &NewInventory {
                    stock_quantity: 5,
                    selling_price: Money::from_cents(1099),
                    unit: "pcs".to_string(),
                },
            )
            .await
            .unwrap();

        let avail = db
            .catalog()
            .check_availability(&product.product_id, &shop.shop_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            avail,
            Availability {
                exists: true,
                available: true,
                stock_quantity: 5
            }
        );

        assert!(db
            .catalog()
            .soft_delete_product(&product.product_id)
            .await
            .unwrap());
        assert!(db
            .catalog()
            .check_availability(&product.product_id, &shop.shop_id)
            .await
            .unwrap()
            .is_none());
    }
}
