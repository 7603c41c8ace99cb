//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Add artificial latency to the simulated analysis endpoints
    #[serde(default = "default_true")]
    pub simulate_latency: bool,

    /// Poll the AI service in the background
    #[serde(default = "default_true")]
    pub enable_status_monitor: bool,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            simulate_latency: true,
            enable_status_monitor: true,
            json_logs: false,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_flags_defaults() {
        let flags = FeatureFlags::default();
        assert!(flags.simulate_latency);
        assert!(flags.enable_status_monitor);
        assert!(!flags.json_logs);
    }

    #[test]
    fn test_feature_flags_deserialization() {
        let json = r#"{"simulate_latency": false, "json_logs": true}"#;

        let flags: FeatureFlags = serde_json::from_str(json).unwrap();
        assert!(!flags.simulate_latency);
        assert!(flags.enable_status_monitor);
        assert!(flags.json_logs);
    }
}
