//! Server configuration
//!
//! All settings can be overridden through environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | WORK_DIR | /var/lib/hostezee | Working directory (database, logs) |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | DATABASE_PATH | <work_dir>/hostezee.db | SQLite database file |
//! | ENVIRONMENT | development | Runtime environment |
//! | NOTIFY_GATEWAY_URL | (unset) | Messaging gateway for pre-bills / payment links |
//! | LOG_LEVEL | info | Log level when RUST_LOG is unset |
//! | REQUEST_TIMEOUT_MS | 30000 | Per-request timeout |
//! | SHUTDOWN_TIMEOUT_MS | 10000 | Graceful shutdown budget |

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// SQLite database path; defaults to `<work_dir>/hostezee.db`
    pub database_path: Option<String>,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Messaging gateway URL; None selects the logging-only notifier
    pub notify_gateway_url: Option<String>,
    /// Log level used when RUST_LOG is unset
    pub log_level: String,
    /// Per-request timeout (milliseconds)
    pub request_timeout_ms: u64,
    /// Graceful shutdown budget (milliseconds)
    pub shutdown_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/hostezee".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path: std::env::var("DATABASE_PATH").ok(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            notify_gateway_url: std::env::var("NOTIFY_GATEWAY_URL").ok(),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            shutdown_timeout_ms: std::env::var("SHUTDOWN_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10000),
        }
    }

    /// Override work dir and port (test scenarios)
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// Resolved SQLite database path
    pub fn database_path(&self) -> PathBuf {
        match &self.database_path {
            Some(p) => PathBuf::from(p),
            None => PathBuf::from(&self.work_dir).join("hostezee.db"),
        }
    }

    /// Log directory under the work dir
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Ensure the work directory layout exists
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.work_dir)?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
