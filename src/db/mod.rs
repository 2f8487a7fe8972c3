use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::stock::{InventoryStore, StoreError};

// ── Products ──────────────────────────────────────────────────────────────────

pub async fn fetch_all_products(pool: &PgPool) -> AppResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT id, sku, name, category, description, created_at, updated_at
         FROM products ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(products)
}

pub async fn fetch_product_by_id(pool: &PgPool, id: i32) -> AppResult<Product> {
    sqlx::query_as::<_, Product>(
        "SELECT id, sku, name, category, description, created_at, updated_at
         FROM products WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
}

pub async fn fetch_product_by_sku(pool: &PgPool, sku: &str) -> AppResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
        "SELECT id, sku, name, category, description, created_at, updated_at
         FROM products WHERE sku = $1",
    )
    .bind(sku)
    .fetch_optional(pool)
    .await?;

    Ok(product)
}

pub async fn insert_product(pool: &PgPool, payload: &CreateProduct) -> AppResult<Product> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (sku, name, category, description)
        VALUES ($1, $2, $3, $4)
        RETURNING id, sku, name, category, description, created_at, updated_at
        "#,
    )
    .bind(&payload.sku)
    .bind(&payload.name)
    .bind(&payload.category)
    .bind(&payload.description)
    .fetch_one(pool)
    .await?;

    Ok(product)
}

// ── Locations ─────────────────────────────────────────────────────────────────

pub async fn fetch_all_locations(pool: &PgPool) -> AppResult<Vec<Location>> {
    let locations = sqlx::query_as::<_, Location>(
        "SELECT id, aisle, bin, created_at FROM locations ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(locations)
}

pub async fn fetch_location_by_id(pool: &PgPool, id: i32) -> AppResult<Location> {
    sqlx::query_as::<_, Location>("SELECT id, aisle, bin, created_at FROM locations WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Location not found".to_string()))
}

pub async fn fetch_location_by_identifiers(
    pool: &PgPool,
    aisle: &str,
    bin: &str,
) -> AppResult<Option<Location>> {
    let location = sqlx::query_as::<_, Location>(
        "SELECT id, aisle, bin, created_at FROM locations WHERE aisle = $1 AND bin = $2",
    )
    .bind(aisle)
    .bind(bin)
    .fetch_optional(pool)
    .await?;

    Ok(location)
}

pub async fn insert_location(pool: &PgPool, payload: &CreateLocation) -> AppResult<Location> {
    let location = sqlx::query_as::<_, Location>(
        r#"
        INSERT INTO locations (aisle, bin)
        VALUES ($1, $2)
        RETURNING id, aisle, bin, created_at
        "#,
    )
    .bind(&payload.aisle)
    .bind(&payload.bin)
    .fetch_one(pool)
    .await?;

    Ok(location)
}

pub async fn update_location(
    pool: &PgPool,
    id: i32,
    payload: &CreateLocation,
) -> AppResult<Location> {
    sqlx::query_as::<_, Location>(
        r#"
        UPDATE locations
        SET aisle = $1,
            bin   = $2
        WHERE id = $3
        RETURNING id, aisle, bin, created_at
        "#,
    )
    .bind(&payload.aisle)
    .bind(&payload.bin)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Location not found".to_string()))
}

// ── Stock store ───────────────────────────────────────────────────────────────

/// Postgres-backed implementation of the stock core's store contract.
#[derive(Clone)]
pub struct PgInventoryStore {
    pool: PgPool,
}

impl PgInventoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryStore for PgInventoryStore {
    async fn find_stock(
        &self,
        product_id: i32,
        location_id: i32,
    ) -> Result<Option<Stock>, StoreError> {
        let stock = sqlx::query_as::<_, Stock>(
            "SELECT product_id, location_id, quantity, updated_at
             FROM stock WHERE product_id = $1 AND location_id = $2",
        )
        .bind(product_id)
        .bind(location_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(stock)
    }

    async fn create_stock(
        &self,
        product_id: i32,
        location_id: i32,
        quantity: i32,
    ) -> Result<Stock, StoreError> {
        let stock = sqlx::query_as::<_, Stock>(
            r#"
            INSERT INTO stock (product_id, location_id, quantity)
            VALUES ($1, $2, $3)
            RETURNING product_id, location_id, quantity, updated_at
            "#,
        )
        .bind(product_id)
        .bind(location_id)
        .bind(quantity)
        .fetch_one(&self.pool)
        .await?;

        Ok(stock)
    }

    // Single atomic read-modify-write: the delta lands in one UPDATE so
    // concurrent adjustments to the same row serialize on the row lock, and
    // the table's CHECK constraint rejects any decrement racing past zero.
    async fn increment_stock(
        &self,
        product_id: i32,
        location_id: i32,
        delta: i32,
    ) -> Result<Stock, StoreError> {
        let stock = sqlx::query_as::<_, Stock>(
            r#"
            UPDATE stock
            SET quantity   = quantity + $3,
                updated_at = $4
            WHERE product_id = $1 AND location_id = $2
            RETURNING product_id, location_id, quantity, updated_at
            "#,
        )
        .bind(product_id)
        .bind(location_id)
        .bind(delta)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(stock)
    }

    async fn find_product(&self, product_id: i32) -> Result<Option<Product>, StoreError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, sku, name, category, description, created_at, updated_at
             FROM products WHERE id = $1",
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn find_location(&self, location_id: i32) -> Result<Option<Location>, StoreError> {
        let location = sqlx::query_as::<_, Location>(
            "SELECT id, aisle, bin, created_at FROM locations WHERE id = $1",
        )
        .bind(location_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(location)
    }

    async fn list_stock(&self) -> Result<Vec<Stock>, StoreError> {
        let rows = sqlx::query_as::<_, Stock>(
            "SELECT product_id, location_id, quantity, updated_at
             FROM stock ORDER BY product_id, location_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
