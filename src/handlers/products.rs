use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::{
    db,
    error::{AppError, AppResult},
    models::{CreateProduct, Product},
    AppState,
};

// ── Create ────────────────────────────────────────────────────────────────────

pub async fn create_product(
    State(state): State<AppState>,
    Json(mut payload): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<Product>)> {
    payload.sku = payload.sku.trim().to_string();
    payload.name = payload.name.trim().to_string();

    if payload.sku.is_empty() {
        return Err(AppError::BadRequest("SKU cannot be empty".to_string()));
    }
    if payload.name.is_empty() {
        return Err(AppError::BadRequest("Name cannot be empty".to_string()));
    }

    // Check-then-create; the unique index backstops a racing duplicate.
    if db::fetch_product_by_sku(&state.db, &payload.sku).await?.is_some() {
        return Err(AppError::Conflict(
            "Product with this SKU already exists".to_string(),
        ));
    }

    let product = db::insert_product(&state.db, &payload).await?;

    info!(id = product.id, sku = %product.sku, "Created product");

    Ok((StatusCode::CREATED, Json(product)))
}

// ── Get by ID ─────────────────────────────────────────────────────────────────

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Product>> {
    if id <= 0 {
        return Err(AppError::BadRequest("Invalid product ID".to_string()));
    }

    let product = db::fetch_product_by_id(&state.db, id).await?;
    Ok(Json(product))
}

// ── List ──────────────────────────────────────────────────────────────────────

pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let products = db::fetch_all_products(&state.db).await?;
    Ok(Json(products))
}
