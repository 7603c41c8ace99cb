//! AI provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Which backend produces reports
    #[serde(default)]
    pub provider: AiProvider,

    /// Gemini API key
    pub gemini_api_key: Option<Secret<String>>,

    /// Gemini model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Generative Language API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Completion timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Upper bound on generated tokens
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Seconds between background status checks
    #[serde(default = "default_status_interval")]
    pub status_interval_secs: u64,
}

/// AI provider type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    Gemini,
    /// No outbound calls; every submission gets a demo report
    Offline,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get status interval as Duration
    pub fn status_interval(&self) -> Duration {
        Duration::from_secs(self.status_interval_secs)
    }

    /// Check if a Gemini key is configured
    pub fn has_gemini(&self) -> bool {
        self.gemini_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    pub fn is_offline(&self) -> bool {
        self.provider == AiProvider::Offline
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.provider == AiProvider::Gemini && !self.has_gemini() {
            return Err(ValidationError::MissingRequired("GEMINI_API_KEY"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        if self.max_output_tokens == 0 {
            return Err(ValidationError::InvalidMaxOutputTokens);
        }
        if self.status_interval_secs == 0 {
            return Err(ValidationError::InvalidStatusInterval);
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl(self.base_url.clone()));
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: AiProvider::default(),
            gemini_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
            status_interval_secs: default_status_interval(),
        }
    }
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout() -> u64 {
    45
}

fn default_max_output_tokens() -> u32 {
    8192
}

fn default_temperature() -> f32 {
    0.4
}

fn default_status_interval() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_key() -> AiConfig {
        AiConfig {
            gemini_api_key: Some(Secret::new("AIza-test".to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.provider, AiProvider::Gemini);
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.timeout_secs, 45);
        assert_eq!(config.max_output_tokens, 8192);
        assert_eq!(config.status_interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_gemini_requires_key() {
        assert_eq!(
            AiConfig::default().validate(),
            Err(ValidationError::MissingRequired("GEMINI_API_KEY"))
        );

        let blank = AiConfig {
            gemini_api_key: Some(Secret::new("  ".to_string())),
            ..Default::default()
        };
        assert!(!blank.has_gemini());
        assert!(blank.validate().is_err());

        assert!(with_key().validate().is_ok());
    }

    #[test]
    fn test_offline_needs_no_key() {
        let config = AiConfig {
            provider: AiProvider::Offline,
            ..Default::default()
        };
        assert!(config.is_offline());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_ranges() {
        let config = AiConfig {
            temperature: 3.0,
            ..with_key()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTemperature));

        let config = AiConfig {
            status_interval_secs: 0,
            ..with_key()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidStatusInterval));

        let config = AiConfig {
            base_url: "ftp://example.com".to_string(),
            ..with_key()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_key_is_redacted_in_debug() {
        let rendered = format!("{:?}", with_key());
        assert!(!rendered.contains("AIza-test"));
    }
}
