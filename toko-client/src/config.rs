//! Client configuration

/// Configuration for connecting to the remote tree store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Store base URL (e.g., "https://toko-default-rtdb.firebaseio.example")
    pub database_url: String,

    /// Timeout for individual write requests, seconds
    pub request_timeout_secs: u64,

    /// Delay before reconnecting a dropped event stream, seconds
    pub reconnect_delay_secs: u64,
}

impl StoreConfig {
    /// Create a configuration with default timeouts
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            request_timeout_secs: 30,
            reconnect_delay_secs: 5,
        }
    }

    /// Read configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::new(
            std::env::var("TOKO_DATABASE_URL")
                .unwrap_or_else(|_| "http://localhost:9000".into()),
        );
        Self {
            request_timeout_secs: std::env::var("TOKO_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            reconnect_delay_secs: std::env::var("TOKO_RECONNECT_DELAY_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.reconnect_delay_secs),
            ..defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_applies_default_timeouts() {
        let config = StoreConfig::new("http://localhost:9000");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.reconnect_delay_secs, 5);
    }
}
