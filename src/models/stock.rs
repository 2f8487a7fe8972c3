use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stock level of one product at one storage location. The composite
/// `(product_id, location_id)` pair identifies at most one row; `quantity`
/// never goes negative.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Stock {
    pub product_id: i32,
    pub location_id: i32,
    pub quantity: i32,
    pub updated_at: DateTime<Utc>,
}

/// Request body shared by the inbound and outbound adjustment endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct StockOperation {
    pub product_id: i32,
    pub location_id: i32,
    pub quantity: i32,
}

/// Wire shape for adjustment and list responses.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StockResponse {
    pub product_id: i32,
    pub location_id: i32,
    pub quantity: i32,
}

impl From<Stock> for StockResponse {
    fn from(stock: Stock) -> Self {
        Self {
            product_id: stock.product_id,
            location_id: stock.location_id,
            quantity: stock.quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_exposes_only_the_adjustment_fields() {
        let stock = Stock {
            product_id: 1,
            location_id: 2,
            quantity: 30,
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(StockResponse::from(stock)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "product_id": 1, "location_id": 2, "quantity": 30 })
        );
    }
}
