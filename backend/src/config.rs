//! Configuration management for the Rice Quality Analyzer
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with RQA_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Inference endpoint configuration
    pub inference: InferenceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InferenceConfig {
    /// Base URL of the OpenAI-compatible inference API
    pub api_endpoint: String,

    /// API key for the inference endpoint
    pub api_key: String,

    /// Vision model identifier
    pub model: String,

    /// Maximum completion tokens per analysis
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f64,

    /// Nucleus sampling cutoff
    pub top_p: f64,
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Fails fast when the inference API key is absent so no analysis can
    /// be attempted without credentials.
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("RQA_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("inference.api_endpoint", "https://api.groq.com/openai/v1")?
            .set_default("inference.api_key", "")?
            .set_default("inference.model", "llama-3.2-11b-vision-preview")?
            .set_default("inference.max_tokens", 400)?
            .set_default("inference.temperature", 0.2)?
            .set_default("inference.top_p", 0.5)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (RQA_ prefix)
            .add_source(
                Environment::with_prefix("RQA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.inference.api_key.trim().is_empty() {
            return Err(ConfigError::Message(
                "inference.api_key must be set (RQA__INFERENCE__API_KEY)".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_inference(api_key: &str) -> InferenceConfig {
        InferenceConfig {
            api_endpoint: "https://api.example.com/v1".to_string(),
            api_key: api_key.to_string(),
            model: "test-vision-model".to_string(),
            max_tokens: 400,
            temperature: 0.2,
            top_p: 0.5,
        }
    }

    #[test]
    fn test_empty_api_key_is_rejected() {
        let config = Config {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            inference: test_inference("  "),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_present_api_key_is_accepted() {
        let config = Config {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            inference: test_inference("gsk-test"),
        };
        assert!(config.validate().is_ok());
    }
}
