//! Stock adjustment core.
//!
//! Applies inbound/outbound quantity deltas to a `(product, location)` stock
//! row, enforces the non-negative invariant, and dispatches a best-effort
//! low-stock alert after each applied adjustment. The core owns no I/O of its
//! own: persistence sits behind [`InventoryStore`] and alert delivery behind
//! [`LowStockNotifier`], so the logic runs unchanged against Postgres in
//! production and in-memory fakes in tests.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::models::{Location, Product, Stock, StockOperation};
use crate::notify::NotifyError;

/// Resulting quantities strictly below this value trigger a low-stock alert.
/// A result of exactly 20 stays quiet; 19 and below (including 0) notify.
pub const LOW_STOCK_THRESHOLD: i32 = 20;

/// Opaque failure raised by an [`InventoryStore`] implementation. The core
/// passes it through untouched; the API boundary maps it to a 503.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct StoreError(String);

impl StoreError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self(detail.into())
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self(err.to_string())
    }
}

/// Narrow repository contract the core mutates stock through.
///
/// `increment_stock` must apply the delta and persist in a single atomic
/// store operation; the residual find-then-create race on first inbound for
/// a pair is resolved by the store's composite primary key, not by the core.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    async fn find_stock(
        &self,
        product_id: i32,
        location_id: i32,
    ) -> Result<Option<Stock>, StoreError>;

    async fn create_stock(
        &self,
        product_id: i32,
        location_id: i32,
        quantity: i32,
    ) -> Result<Stock, StoreError>;

    /// Apply `delta` (negative for outbound) to an existing row, refresh its
    /// `updated_at`, and return the persisted result.
    async fn increment_stock(
        &self,
        product_id: i32,
        location_id: i32,
        delta: i32,
    ) -> Result<Stock, StoreError>;

    async fn find_product(&self, product_id: i32) -> Result<Option<Product>, StoreError>;

    async fn find_location(&self, location_id: i32) -> Result<Option<Location>, StoreError>;

    async fn list_stock(&self) -> Result<Vec<Stock>, StoreError>;
}

/// Outbound seam for the notification gateway.
#[async_trait]
pub trait LowStockNotifier: Send + Sync {
    async fn notify_low_stock(
        &self,
        product_id: i32,
        location_id: i32,
        quantity: i32,
    ) -> Result<(), NotifyError>;
}

/// Failure kinds surfaced by the core, in the order they are checked.
#[derive(Debug, thiserror::Error)]
pub enum StockError {
    #[error("quantity must be positive")]
    InvalidQuantity,
    #[error("product not found")]
    ProductNotFound,
    #[error("location not found")]
    LocationNotFound,
    #[error("no stock row for this product/location pair")]
    StockNotFound,
    #[error("insufficient stock")]
    InsufficientStock,
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct StockCore<S, N> {
    store: S,
    notifier: N,
}

impl<S: InventoryStore, N: LowStockNotifier> StockCore<S, N> {
    pub fn new(store: S, notifier: N) -> Self {
        Self { store, notifier }
    }

    /// Receive `quantity` units of a product at a location.
    ///
    /// Checks run in a fixed order: quantity positivity, product existence,
    /// location existence. The first inbound for a pair creates the stock
    /// row; later ones increment it in place.
    pub async fn adjust_inbound(&self, op: &StockOperation) -> Result<Stock, StockError> {
        if op.quantity <= 0 {
            return Err(StockError::InvalidQuantity);
        }
        if self.store.find_product(op.product_id).await?.is_none() {
            return Err(StockError::ProductNotFound);
        }
        if self.store.find_location(op.location_id).await?.is_none() {
            return Err(StockError::LocationNotFound);
        }

        let updated = match self.store.find_stock(op.product_id, op.location_id).await? {
            Some(_) => {
                self.store
                    .increment_stock(op.product_id, op.location_id, op.quantity)
                    .await?
            }
            None => {
                self.store
                    .create_stock(op.product_id, op.location_id, op.quantity)
                    .await?
            }
        };

        info!(
            product_id = updated.product_id,
            location_id = updated.location_id,
            received = op.quantity,
            quantity = updated.quantity,
            "Inbound stock adjustment applied"
        );

        self.alert_if_low(&updated).await;
        Ok(updated)
    }

    /// Ship `quantity` units of a product from a location.
    ///
    /// Only the stock row's presence matters here; product and location
    /// tables are not consulted. An adjustment that would drive the quantity
    /// negative is rejected with the row left untouched.
    pub async fn adjust_outbound(&self, op: &StockOperation) -> Result<Stock, StockError> {
        if op.quantity <= 0 {
            return Err(StockError::InvalidQuantity);
        }

        let existing = self
            .store
            .find_stock(op.product_id, op.location_id)
            .await?
            .ok_or(StockError::StockNotFound)?;

        if existing.quantity < op.quantity {
            return Err(StockError::InsufficientStock);
        }

        let updated = self
            .store
            .increment_stock(op.product_id, op.location_id, -op.quantity)
            .await?;

        info!(
            product_id = updated.product_id,
            location_id = updated.location_id,
            shipped = op.quantity,
            quantity = updated.quantity,
            "Outbound stock adjustment applied"
        );

        self.alert_if_low(&updated).await;
        Ok(updated)
    }

    pub async fn list(&self) -> Result<Vec<Stock>, StockError> {
        Ok(self.store.list_stock().await?)
    }

    /// Best-effort low-stock dispatch. The adjustment is already durable by
    /// the time this runs, and a delivery failure is logged and dropped, so
    /// the side effect can never fail the adjustment.
    async fn alert_if_low(&self, stock: &Stock) {
        if stock.quantity >= LOW_STOCK_THRESHOLD {
            return;
        }
        match self
            .notifier
            .notify_low_stock(stock.product_id, stock.location_id, stock.quantity)
            .await
        {
            Ok(()) => debug!(
                product_id = stock.product_id,
                location_id = stock.location_id,
                quantity = stock.quantity,
                "Low stock alert dispatched"
            ),
            Err(err) => warn!(
                product_id = stock.product_id,
                location_id = stock.location_id,
                quantity = stock.quantity,
                error = %err,
                "Low stock alert failed, adjustment unaffected"
            ),
        }
    }
}
