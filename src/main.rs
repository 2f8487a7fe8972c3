use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

mod config;
mod db;
mod error;
mod handlers;
mod models;
mod notify;
mod stock;
mod util;

use crate::config::Config;
use crate::db::PgInventoryStore;
use crate::notify::HttpNotifier;
use crate::stock::StockCore;

/// Shared application state — cheap to clone (pool and core live behind Arc).
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub stock: Arc<StockCore<PgInventoryStore, HttpNotifier>>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (ignored in production where env vars are injected)
    dotenv::dotenv().ok();

    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,wms_inventory_service=debug".parse().unwrap()),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    info!("WMS Inventory Management — Rust + Axum");

    info!("Connecting to PostgreSQL...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;
    info!("Database connection pool established.");

    info!("Running migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Migrations complete.");

    if config.notification_url.is_none() {
        info!("NOTIFICATION_SERVICE_URL not set — low-stock alerts will be skipped");
    }
    let notifier = HttpNotifier::new(
        config.notification_url.clone(),
        Duration::from_secs(config.notification_timeout_secs),
    )?;

    let state = AppState {
        db: pool.clone(),
        stock: Arc::new(StockCore::new(PgInventoryStore::new(pool), notifier)),
    };

    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))

        // ── Health probes ───────────────────────────────────────────────────
        .route("/health", get(handlers::health::health))
        .route("/health/liveness", get(handlers::health::liveness))
        .route("/health/readiness", get(handlers::health::readiness))
        .route("/health/startup", get(handlers::health::startup))

        // ── Products ────────────────────────────────────────────────────────
        .route(
            "/products",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route("/products/:id", get(handlers::products::get_product))

        // ── Locations ───────────────────────────────────────────────────────
        .route(
            "/locations",
            get(handlers::locations::list_locations).post(handlers::locations::create_location),
        )
        .route(
            "/locations/:id",
            get(handlers::locations::get_location).put(handlers::locations::update_location),
        )

        // ── Stock adjustments ───────────────────────────────────────────────
        .route("/stock", get(handlers::stock::list_stock))
        .route("/stock/inbound", post(handlers::stock::inbound))
        .route("/stock/outbound", post(handlers::stock::outbound))

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
