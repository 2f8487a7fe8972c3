use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::{
    db,
    error::{AppError, AppResult},
    models::{CreateLocation, Location},
    AppState,
};

// ── Create ────────────────────────────────────────────────────────────────────

pub async fn create_location(
    State(state): State<AppState>,
    Json(mut payload): Json<CreateLocation>,
) -> AppResult<(StatusCode, Json<Location>)> {
    payload.aisle = payload.aisle.trim().to_string();
    payload.bin = payload.bin.trim().to_string();

    if payload.aisle.is_empty() {
        return Err(AppError::BadRequest(
            "Aisle identifier cannot be empty".to_string(),
        ));
    }
    if payload.bin.is_empty() {
        return Err(AppError::BadRequest(
            "Bin identifier cannot be empty".to_string(),
        ));
    }

    if db::fetch_location_by_identifiers(&state.db, &payload.aisle, &payload.bin)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Location already exists".to_string()));
    }

    let location = db::insert_location(&state.db, &payload).await?;

    info!(id = location.id, aisle = %location.aisle, bin = %location.bin, "Created location");

    Ok((StatusCode::CREATED, Json(location)))
}

// ── Update ────────────────────────────────────────────────────────────────────

pub async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CreateLocation>,
) -> AppResult<Json<Location>> {
    let location = db::update_location(&state.db, id, &payload).await?;

    info!(id = location.id, "Updated location");

    Ok(Json(location))
}

// ── Get by ID ─────────────────────────────────────────────────────────────────

pub async fn get_location(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Location>> {
    let location = db::fetch_location_by_id(&state.db, id).await?;
    Ok(Json(location))
}

// ── List ──────────────────────────────────────────────────────────────────────

pub async fn list_locations(State(state): State<AppState>) -> AppResult<Json<Vec<Location>>> {
    let locations = db::fetch_all_locations(&state.db).await?;
    Ok(Json(locations))
}
