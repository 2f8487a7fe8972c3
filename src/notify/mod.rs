//! Low-stock alert delivery.
//!
//! Posts a fixed-shape JSON alert to the external notification service. The
//! whole module is best-effort: an unset endpoint is a logged no-op, and
//! delivery failures are logged and returned as plain error values that the
//! stock core discards.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error};

use crate::stock::LowStockNotifier;

/// Wire payload for a low-stock alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertPayload {
    pub level: String,
    pub category: String,
    pub title: String,
    pub message: String,
}

impl AlertPayload {
    pub fn low_stock(product_id: i32, location_id: i32, quantity: i32) -> Self {
        Self {
            level: "Warning".to_string(),
            category: "stock alerts".to_string(),
            title: format!(
                "Low stock alert for product {} at location {}",
                product_id, location_id
            ),
            message: format!("Stock level is {}. Consider restocking.", quantity),
        }
    }
}

/// Delivery failure. Benign by contract: callers log and move on.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("network error: {0}")]
    Network(String),
    #[error("notification service returned HTTP {0}")]
    Status(reqwest::StatusCode),
}

/// Notification gateway speaking HTTP to the configured alert endpoint.
pub struct HttpNotifier {
    client: Client,
    endpoint: Option<String>,
}

impl HttpNotifier {
    /// `endpoint` is optional: without one, every dispatch is a logged no-op.
    /// The timeout bounds the whole request so a slow notification service
    /// cannot stall the adjustment path.
    pub fn new(endpoint: Option<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl LowStockNotifier for HttpNotifier {
    async fn notify_low_stock(
        &self,
        product_id: i32,
        location_id: i32,
        quantity: i32,
    ) -> Result<(), NotifyError> {
        let Some(endpoint) = self.endpoint.as_deref() else {
            error!(
                "notification-url-undefined: no URL configured for the notification service, skipping alert"
            );
            return Ok(());
        };

        let payload = AlertPayload::low_stock(product_id, location_id, quantity);

        let response = self
            .client
            .post(endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|err| {
                error!(error = %err, "alert-failed: could not reach the notification service");
                NotifyError::Network(err.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(%status, "alert-failed: notification service rejected the alert");
            return Err(NotifyError::Status(status));
        }

        debug!(product_id, location_id, quantity, "Low stock alert delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_matches_the_notification_contract() {
        let payload = AlertPayload::low_stock(1, 101, 15);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "level": "Warning",
                "category": "stock alerts",
                "title": "Low stock alert for product 1 at location 101",
                "message": "Stock level is 15. Consider restocking.",
            })
        );
    }

    #[test]
    fn payload_embeds_zero_quantities() {
        let payload = AlertPayload::low_stock(3, 4, 0);
        assert_eq!(payload.message, "Stock level is 0. Consider restocking.");
    }

    #[tokio::test]
    async fn unset_endpoint_is_a_no_op() {
        let notifier = HttpNotifier::new(None, Duration::from_secs(1)).unwrap();
        assert!(notifier.notify_low_stock(1, 1, 5).await.is_ok());
    }

    #[tokio::test]
    async fn unreachable_endpoint_yields_a_benign_error() {
        // Port 9 (discard) on localhost refuses connections immediately.
        let notifier = HttpNotifier::new(
            Some("http://127.0.0.1:9/alert".to_string()),
            Duration::from_secs(1),
        )
        .unwrap();

        let err = notifier.notify_low_stock(1, 1, 5).await.unwrap_err();
        assert!(matches!(err, NotifyError::Network(_)));
    }
}
