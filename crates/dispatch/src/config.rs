//! Dispatcher configuration
//!
//! Hosts embed [`DispatchConfig`] in their framework config file (a
//! `[dispatch]` table in the framework's TOML) and pass it to
//! [`Dispatcher::with_config`](crate::Dispatcher::with_config) or
//! [`global::initialize_with_config`](crate::global::initialize_with_config).
//! Every field has a default, so a missing or partial table is fine.

use serde::{Deserialize, Serialize};

/// Tuning knobs for the main-thread dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Drains taking longer than this many milliseconds log a warning
    pub slow_drain_warn_ms: u64,

    /// Initial capacity of the pending queue (pre-allocation only, the
    /// queue itself grows without bound)
    pub initial_queue_capacity: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            slow_drain_warn_ms: 1,
            initial_queue_capacity: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DispatchConfig::default();
        assert_eq!(config.slow_drain_warn_ms, 1);
        assert_eq!(config.initial_queue_capacity, 64);
    }

    #[test]
    fn test_partial_table_fills_defaults() {
        let config: DispatchConfig = toml::from_str("slow_drain_warn_ms = 5").unwrap();
        assert_eq!(config.slow_drain_warn_ms, 5);
        assert_eq!(config.initial_queue_capacity, 64);
    }

    #[test]
    fn test_empty_table_is_default() {
        let config: DispatchConfig = toml::from_str("").unwrap();
        assert_eq!(config.slow_drain_warn_ms, 1);
        assert_eq!(config.initial_queue_capacity, 64);
    }

    #[test]
    fn test_serialize() {
        let config = DispatchConfig {
            slow_drain_warn_ms: 10,
            initial_queue_capacity: 256,
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("slow_drain_warn_ms = 10"));
        assert!(toml_str.contains("initial_queue_capacity = 256"));
    }
}
