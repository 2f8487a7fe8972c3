use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util::iso8601_utc;

/// Storage location entity. The `(aisle, bin)` pair is the unique business
/// key; `id` is the store-assigned surrogate.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Location {
    pub id: i32,
    pub aisle: String,
    pub bin: String,
    #[serde(with = "iso8601_utc")]
    pub created_at: DateTime<Utc>,
}

/// Payload for both location creation and update.
#[derive(Debug, Deserialize)]
pub struct CreateLocation {
    pub aisle: String,
    pub bin: String,
}
