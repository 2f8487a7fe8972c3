use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util::iso8601_utc;

/// Core product entity. `sku` is the globally unique business key; `id` is
/// the store-assigned surrogate that stock rows reference.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub sku: String,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    #[serde(with = "iso8601_utc")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso8601_utc")]
    pub updated_at: DateTime<Utc>,
}

// ── Request payloads ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateProduct {
    pub sku: String,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn serializes_timestamps_in_wire_format() {
        let product = Product {
            id: 1,
            sku: "SKU-001".to_string(),
            name: "Widget".to_string(),
            category: "Hardware".to_string(),
            description: None,
            created_at: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2023, 1, 2, 12, 30, 45).unwrap(),
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["created_at"], "2023-01-01T00:00:00Z");
        assert_eq!(json["updated_at"], "2023-01-02T12:30:45Z");
        assert_eq!(json["description"], serde_json::Value::Null);
    }
}
