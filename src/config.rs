use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Alert endpoint of the external notification service. Optional: when
    /// unset, low-stock alerts are skipped.
    pub notification_url: Option<String>,
    pub notification_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            notification_url: std::env::var("NOTIFICATION_SERVICE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            notification_timeout_secs: std::env::var("NOTIFICATION_TIMEOUT_SECS")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(5),
        })
    }
}
