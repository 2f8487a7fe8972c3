use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{StockOperation, StockResponse},
    AppState,
};

pub async fn inbound(
    State(state): State<AppState>,
    Json(operation): Json<StockOperation>,
) -> AppResult<Json<StockResponse>> {
    let stock = state.stock.adjust_inbound(&operation).await?;
    Ok(Json(stock.into()))
}

pub async fn outbound(
    State(state): State<AppState>,
    Json(operation): Json<StockOperation>,
) -> AppResult<Json<StockResponse>> {
    let stock = state.stock.adjust_outbound(&operation).await?;
    Ok(Json(stock.into()))
}

pub async fn list_stock(State(state): State<AppState>) -> AppResult<Json<Vec<StockResponse>>> {
    let rows = state.stock.list().await?;
    Ok(Json(rows.into_iter().map(StockResponse::from).collect()))
}
