use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::stock::{StockError, StoreError};

pub type AppResult<T> = Result<T, AppError>;

/// Application-level failures. Every variant is rendered as the common error
/// envelope `{criticality, id, detail, recoverySuggestion?}` with a status
/// matching the failure kind.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Insufficient stock")]
    InsufficientStock,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::InsufficientStock => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client. Store and internal failures keep their
    /// detail server-side only.
    fn client_detail(&self) -> String {
        match self {
            AppError::Database(_) | AppError::Store(_) => "Database unavailable".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            AppError::InsufficientStock => {
                Some("Reduce the requested quantity or restock the location first")
            }
            AppError::Database(_) | AppError::Store(_) => {
                Some("Retry once the database is reachable")
            }
            _ => None,
        }
    }
}

/// Stock Core error kinds translated to HTTP semantics at the API boundary.
impl From<StockError> for AppError {
    fn from(err: StockError) -> Self {
        match err {
            StockError::InvalidQuantity => {
                AppError::BadRequest("Quantity must be positive".to_string())
            }
            StockError::ProductNotFound => AppError::NotFound("Product not found".to_string()),
            StockError::LocationNotFound => AppError::NotFound("Location not found".to_string()),
            StockError::StockNotFound => AppError::NotFound(
                "No stock found for this product at the specified location".to_string(),
            ),
            StockError::InsufficientStock => AppError::InsufficientStock,
            StockError::Store(err) => AppError::Store(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, AppError::Database(_) | AppError::Store(_) | AppError::Internal(_)) {
            error!(error = %self, "Request failed");
        }

        // Every surfaced failure stops the request, so criticality is always
        // "critical"; the id is an opaque correlation handle for support.
        let mut body = json!({
            "criticality": "critical",
            "id": Uuid::new_v4(),
            "detail": self.client_detail(),
        });
        if let Some(suggestion) = self.recovery_suggestion() {
            body["recoverySuggestion"] = json!(suggestion);
        }

        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_failure_kinds() {
        assert_eq!(
            AppError::BadRequest("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("missing".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Conflict("dup".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(AppError::InsufficientStock.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Store(StoreError::new("connection refused")).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn stock_errors_map_to_observed_messages() {
        let err = AppError::from(StockError::InvalidQuantity);
        assert_eq!(err.client_detail(), "Quantity must be positive");

        let err = AppError::from(StockError::StockNotFound);
        assert_eq!(
            err.client_detail(),
            "No stock found for this product at the specified location"
        );

        let err = AppError::from(StockError::InsufficientStock);
        assert_eq!(err.client_detail(), "Insufficient stock");
        assert!(err.recovery_suggestion().is_some());
    }

    #[test]
    fn store_detail_is_suppressed_from_clients() {
        let err = AppError::Store(StoreError::new("password authentication failed"));
        assert_eq!(err.client_detail(), "Database unavailable");
    }
}
