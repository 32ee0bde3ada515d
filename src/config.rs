//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Aggregate weight budget applied to each cache partition
    pub cache_max_weight: usize,
    /// Whether bank read handlers go through their cache partition
    pub cache_banks_enabled: bool,
    /// Whether currency read handlers go through their cache partition
    pub cache_currencies_enabled: bool,
    /// Whether rate read handlers go through their cache partitions
    pub cache_rates_enabled: bool,
    /// HTTP server port
    pub server_port: u16,
    /// Cache statistics reporting interval in seconds
    pub stats_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_WEIGHT` - Weight budget per partition (default: 5242)
    /// - `CACHE_BANKS_ENABLED` - Bank caching on/off (default: true)
    /// - `CACHE_CURRENCIES_ENABLED` - Currency caching on/off (default: true)
    /// - `CACHE_RATES_ENABLED` - Rate caching on/off (default: true)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `STATS_INTERVAL` - Stats reporting frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        Self {
            cache_max_weight: env::var("CACHE_MAX_WEIGHT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5242),
            cache_banks_enabled: env::var("CACHE_BANKS_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            cache_currencies_enabled: env::var("CACHE_CURRENCIES_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            cache_rates_enabled: env::var("CACHE_RATES_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            stats_interval: env::var("STATS_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_max_weight: 5242,
            cache_banks_enabled: true,
            cache_currencies_enabled: true,
            cache_rates_enabled: true,
            server_port: 3000,
            stats_interval: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_max_weight, 5242);
        assert!(config.cache_banks_enabled);
        assert!(config.cache_currencies_enabled);
        assert!(config.cache_rates_enabled);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.stats_interval, 60);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("CACHE_MAX_WEIGHT");
        env::remove_var("CACHE_BANKS_ENABLED");
        env::remove_var("CACHE_CURRENCIES_ENABLED");
        env::remove_var("CACHE_RATES_ENABLED");
        env::remove_var("SERVER_PORT");
        env::remove_var("STATS_INTERVAL");

        let config = Config::from_env();
        assert_eq!(config.cache_max_weight, 5242);
        assert!(config.cache_rates_enabled);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.stats_interval, 60);
    }
}
