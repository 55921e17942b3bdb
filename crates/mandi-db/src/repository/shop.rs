//! # Shop Repository
//!
//! Database operations for shops: creation, lookup, the active/inactive
//! merchandising toggle, and single-table soft-delete.
//!
//! Deactivating or soft-deleting a shop never touches its inventory rows;
//! the catalog joins simply stop matching them.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use mandi_core::validation::validate_shop_name;
use mandi_core::{NewShop, Shop};

/// Shop columns in the order the entity struct declares them.
const SHOP_COLUMNS: &str = "shop_id, name, is_active, is_deleted, deleted_at, created_at";

/// Repository for shop database operations.
#[derive(Debug, Clone)]
pub struct ShopRepository {
    pool: SqlitePool,
}

impl ShopRepository {
    /// Creates a new ShopRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ShopRepository { pool }
    }

    /// Inserts a new shop, active by default.
    ///
    /// ## Returns
    /// * `Ok(Shop)` - The materialized row
    /// * `Err(DbError::Validation)` - Name empty or over 255 characters
    pub async fn create_shop(&self, input: &NewShop) -> DbResult<Shop> {
        validate_shop_name(&input.name)?;

        debug!(name = %input.name, "Creating shop");

        let shop = Shop {
            shop_id: generate_shop_id(),
            name: input.name.clone(),
            is_active: true,
            is_deleted: false,
            deleted_at: None,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO shops (shop_id, name, is_active, is_deleted, deleted_at, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&shop.shop_id)
        .bind(&shop.name)
        .bind(shop.is_active)
        .bind(shop.is_deleted)
        .bind(shop.deleted_at)
        .bind(shop.created_at)
        .execute(&self.pool)
        .await?;

        Ok(shop)
    }

    /// Gets a live shop by its ID; inactive shops still come back.
    pub async fn get_shop(&self, shop_id: &str) -> DbResult<Option<Shop>> {
        let sql =
            format!("SELECT {SHOP_COLUMNS} FROM shops WHERE shop_id = ?1 AND is_deleted = 0");

        let shop = sqlx::query_as::<_, Shop>(&sql)
            .bind(shop_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(shop)
    }

    /// Lists live, active shops, alphabetically by name.
    pub async fn list_shops(&self) -> DbResult<Vec<Shop>> {
        let sql = format!(
            "SELECT {SHOP_COLUMNS} FROM shops \
             WHERE is_deleted = 0 AND is_active = 1 ORDER BY name"
        );

        let shops = sqlx::query_as::<_, Shop>(&sql).fetch_all(&self.pool).await?;

        Ok(shops)
    }

    /// Toggles a live shop's active flag.
    ///
    /// An inactive shop keeps its inventory but drops out of product
    /// listings and availability checks until reactivated.
    ///
    /// ## Returns
    /// * `Ok(true)` - A live shop matched and was updated
    /// * `Ok(false)` - Missing or soft-deleted
    pub async fn set_shop_active(&self, shop_id: &str, active: bool) -> DbResult<bool> {
        debug!(shop_id = %shop_id, active, "Setting shop active flag");

        let result = sqlx::query(
            "UPDATE shops SET is_active = ?2 WHERE shop_id = ?1 AND is_deleted = 0",
        )
        .bind(shop_id)
        .bind(active)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Soft-deletes a shop.
    ///
    /// Single-table: its inventory rows stay active and keep occupying the
    /// unique (shop, product) slot, but every catalog read stops seeing
    /// them once the shop row is flagged.
    ///
    /// ## Returns
    /// * `Ok(true)` - The shop was live and is now deleted
    /// * `Ok(false)` - Missing or already deleted
    pub async fn soft_delete_shop(&self, shop_id: &str) -> DbResult<bool> {
        debug!(shop_id = %shop_id, "Soft-deleting shop");

        let result = sqlx::query(
            "UPDATE shops SET is_deleted = 1, deleted_at = ?2 \
             WHERE shop_id = ?1 AND is_deleted = 0",
        )
        .bind(shop_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Generates a unique shop ID.
pub fn generate_shop_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
