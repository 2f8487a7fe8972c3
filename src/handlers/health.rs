use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde_json::{json, Value};
use sqlx::PgPool;
use tracing::error;

use crate::{util, AppState};

/// Probe the database with a trivial query, reporting round-trip time.
async fn check_database(pool: &PgPool) -> Value {
    let start = Instant::now();
    match sqlx::query("SELECT 1").execute(pool).await {
        Ok(_) => json!({
            "status": "UP",
            "details": {
                "responseTime": format!("{:.2}ms", start.elapsed().as_secs_f64() * 1000.0),
            },
        }),
        Err(err) => {
            error!(error = %err, "Database connectivity check failed");
            json!({
                "status": "DOWN",
                "details": { "error": err.to_string() },
            })
        }
    }
}

/// Overall status is UP only when every component is UP; anything else is a
/// 503 so orchestrators stop routing traffic here.
fn health_response(components: Value) -> (StatusCode, Json<Value>) {
    let healthy = components
        .as_object()
        .map(|map| map.values().all(|component| component["status"] == "UP"))
        .unwrap_or(false);

    let body = json!({
        "status": if healthy { "UP" } else { "DOWN" },
        "timestamp": util::format_datetime(&Utc::now()),
        "components": components,
    });

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(body))
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let components = json!({
        "application": { "status": "UP" },
        "database": check_database(&state.db).await,
    });
    health_response(components)
}

/// Liveness needs no component checks: the process answering is the signal.
pub async fn liveness() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "UP",
            "timestamp": util::format_datetime(&Utc::now()),
        })),
    )
}

pub async fn readiness(state: State<AppState>) -> (StatusCode, Json<Value>) {
    health(state).await
}

pub async fn startup(state: State<AppState>) -> (StatusCode, Json<Value>) {
    health(state).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_components_up_is_healthy() {
        let components = json!({
            "application": { "status": "UP" },
            "database": { "status": "UP" },
        });
        let (status, Json(body)) = health_response(components);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "UP");
    }

    #[test]
    fn any_component_down_yields_503() {
        let components = json!({
            "application": { "status": "UP" },
            "database": { "status": "DOWN", "details": { "error": "refused" } },
        });
        let (status, Json(body)) = health_response(components);
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "DOWN");
        assert_eq!(body["components"]["database"]["status"], "DOWN");
    }
}
