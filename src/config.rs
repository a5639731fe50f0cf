//! Application configuration
//!
//! Listen address from environment variables with defaults. The update
//! interval and the thought catalogue are fixed and not configurable.

use std::env;

/// Default port the server listens on
pub const DEFAULT_PORT: u16 = 5000;

/// Default host address (all interfaces)
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: DEFAULT_PORT,
                host: DEFAULT_HOST.to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            server: ServerConfig {
                port: lookup("PORT")
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(defaults.server.port),
                host: lookup("HOST").unwrap_or(defaults.server.host),
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
