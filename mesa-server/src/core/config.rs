//! Server configuration
//!
//! All settings can be overridden through environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | HTTP_PORT | 8080 | HTTP service port |
//! | DATABASE_PATH | mesa.db | SQLite database file |
//! | ENVIRONMENT | development | runtime environment |
//! | LOG_LEVEL | info | tracing level |
//! | LOG_DIR | (none) | daily-rolling log directory |

use crate::auth::JwtConfig;

#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API service port
    pub http_port: u16,
    /// SQLite database file path
    pub database_path: String,
    /// JWT authentication settings
    pub jwt: JwtConfig,
    /// development | staging | production
    pub environment: String,
    /// tracing level
    pub log_level: String,
    /// Optional directory for daily-rolling log files
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database_path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| "mesa.db".into()),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
