//! Server configuration
//!
//! All settings come from environment variables with defaults:
//!
//! | Environment variable | Default | Purpose |
//! |----------------------|---------|---------|
//! | WORK_DIR | ./data | Database and log files |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | MENU_FILE | (unset) | JSON menu seed; built-in menu when unset |
//! | REQUEST_TIMEOUT_MS | 30000 | Per-request timeout at the HTTP layer |
//! | ENVIRONMENT | development | development \| staging \| production |

#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the order database and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Optional JSON file seeding the menu catalog
    pub menu_file: Option<String>,
    /// Request timeout applied at the HTTP layer (milliseconds)
    pub request_timeout_ms: u64,
    /// Runtime environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            menu_file: std::env::var("MENU_FILE").ok(),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30_000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Override work dir and port (used by tests)
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
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
