//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;

use crate::cache::DEFAULT_SWEEP_INTERVAL_SECS;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// SQLite connection string; the in-memory store is used when unset
    pub database_url: Option<String>,
    /// Whether product reads go through the cache
    pub cache_enabled: bool,
    /// Interval in seconds between full cache sweeps
    pub cache_sweep_interval: u64,
    /// Page size used when a list request omits `size`
    pub default_page_size: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `DATABASE_URL` - SQLite URL, e.g. `sqlite://products.db?mode=rwc` (default: unset)
    /// - `CACHE_ENABLED` - `true`/`false` (default: true)
    /// - `CACHE_SWEEP_INTERVAL` - Full cache clear frequency in seconds (default: 600)
    /// - `DEFAULT_PAGE_SIZE` - List page size (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            database_url: env::var("DATABASE_URL").ok().filter(|v| !v.trim().is_empty()),
            cache_enabled: parse_var("CACHE_ENABLED").unwrap_or(defaults.cache_enabled),
            cache_sweep_interval: parse_var::<u64>("CACHE_SWEEP_INTERVAL")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.cache_sweep_interval),
            default_page_size: parse_var::<usize>("DEFAULT_PAGE_SIZE")
                .filter(|size| *size > 0)
                .unwrap_or(defaults.default_page_size),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            database_url: None,
            cache_enabled: true,
            cache_sweep_interval: DEFAULT_SWEEP_INTERVAL_SECS,
            default_page_size: 10,
        }
    }
}
