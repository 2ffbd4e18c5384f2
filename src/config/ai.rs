//! Completion API configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Settings for the hosted language-model API
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    pub openai_api_key: Option<Secret<String>>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Transport-level timeout for a single upstream request
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Capacity of the channel between the upstream reader and the client writer
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl AiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn has_openai(&self) -> bool {
        self.openai_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_openai() {
            return Err(ValidationError::MissingRequired("AI__OPENAI_API_KEY"));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        if self.max_tokens == 0 {
            return Err(ValidationError::InvalidMaxTokens);
        }
        if self.channel_capacity == 0 {
            return Err(ValidationError::InvalidChannelCapacity);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_channel_capacity() -> usize {
    32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> AiConfig {
        AiConfig {
            openai_api_key: Some(Secret::new("sk-test".to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_match_assistant_parameters() {
        let config = AiConfig::default();
        assert_eq!(config.model, "gpt-4o-mini");
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.max_tokens, 2000);
        assert_eq!(config.timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_missing_key_rejected() {
        assert!(AiConfig::default().validate().is_err());
        let blank = AiConfig {
            openai_api_key: Some(Secret::new(String::new())),
            ..Default::default()
        };
        assert!(!blank.has_openai());
    }

    #[test]
    fn test_parameter_bounds() {
        let mut config = configured();
        assert!(config.validate().is_ok());

        config.temperature = 3.0;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidTemperature)
        ));

        let mut config = configured();
        config.max_tokens = 0;
        assert!(config.validate().is_err());

        let mut config = configured();
        config.channel_capacity = 0;
        assert!(config.validate().is_err());
    }
}
