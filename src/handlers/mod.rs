pub mod health;
pub mod locations;
pub mod products;
pub mod stock;

use axum::Json;
use serde_json::json;

pub async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "WMS Inventory Management System" }))
}
