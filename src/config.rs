//! Coordinator configuration.

use serde::{Deserialize, Serialize};

/// Runtime configuration for the coordinator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Capacity of the command queue between handles and the worker.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer: usize,

    /// Whether the auxiliary lifecycle can be driven at all. This is a
    /// runtime capability flag, selected at construction.
    #[serde(default)]
    pub aux_enabled: bool,

    /// Name given to the dedicated worker thread by
    /// [`Coordinator::spawn_thread`](crate::coordinator::Coordinator::spawn_thread).
    #[serde(default = "default_worker_thread_name")]
    pub worker_thread_name: String,
}

fn default_channel_buffer() -> usize {
    32
}

fn default_worker_thread_name() -> String {
    "lifecycle-worker".to_string()
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            channel_buffer: default_channel_buffer(),
            aux_enabled: false,
            worker_thread_name: default_worker_thread_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CoordinatorConfig::default();
        assert_eq!(config.channel_buffer, 32);
        assert!(!config.aux_enabled);
        assert_eq!(config.worker_thread_name, "lifecycle-worker");
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: CoordinatorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.channel_buffer, 32);
        assert!(!config.aux_enabled);
        assert_eq!(config.worker_thread_name, "lifecycle-worker");
    }

    #[test]
    fn test_partial_config_overrides() {
        let config: CoordinatorConfig =
            serde_json::from_str(r#"{"aux_enabled": true, "channel_buffer": 8}"#).unwrap();
        assert_eq!(config.channel_buffer, 8);
        assert!(config.aux_enabled);
        assert_eq!(config.worker_thread_name, "lifecycle-worker");
    }
}
