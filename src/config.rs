/// Application configuration read from the process environment
///
/// An optional `.env` file in the working directory is loaded first, so
/// `API_KEY=...` can live there during development.

use std::time::Duration;
use thiserror::Error;

/// Default generative model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default Gemini API base URL
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default timeout for one recommendation request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { name: &'static str, value: String },
}

/// Settings for the generative AI service
#[derive(Clone, PartialEq)]
pub struct AiConfig {
    /// Credential for the AI service; requests fail without it
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

// The API key never reaches the logs
impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AiConfig {
    /// Load `.env` (if present) and read the configuration from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env file");
        }
        let config = Self::from_lookup(|name| std::env::var(name).ok())?;
        if config.api_key.is_none() {
            tracing::warn!("API_KEY is not set; similar-watch recommendations will fail");
        }
        tracing::info!(?config, "AI configuration loaded");
        Ok(config)
    }

    /// Build the configuration from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let api_key = non_empty("API_KEY").or_else(|| non_empty("GEMINI_API_KEY"));
        let model = non_empty("CLE_DU_TEMPS_MODEL").unwrap_or(defaults.model);
        let base_url = non_empty("CLE_DU_TEMPS_AI_BASE_URL").unwrap_or(defaults.base_url);

        const TIMEOUT_VAR: &str = "CLE_DU_TEMPS_AI_TIMEOUT_SECS";
        let timeout = match non_empty(TIMEOUT_VAR) {
            None => defaults.timeout,
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        name: TIMEOUT_VAR,
                        value,
                    })
                }
            },
        };

        Ok(Self {
            api_key,
            model,
            base_url,
            timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AiConfig::default());
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = AiConfig::from_lookup(lookup(&[
            ("API_KEY", "secret"),
            ("CLE_DU_TEMPS_MODEL", "gemini-2.5-pro"),
            ("CLE_DU_TEMPS_AI_BASE_URL", "http://localhost:8080"),
            ("CLE_DU_TEMPS_AI_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_gemini_api_key_fallback() {
        let config = AiConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "fallback")])).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("fallback"));

        let config = AiConfig::from_lookup(lookup(&[
            ("API_KEY", "primary"),
            ("GEMINI_API_KEY", "fallback"),
        ]))
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("primary"));
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let config = AiConfig::from_lookup(lookup(&[("API_KEY", "  ")])).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_invalid_timeout() {
        for bad in ["0", "soon", "-3"] {
            let result = AiConfig::from_lookup(lookup(&[("CLE_DU_TEMPS_AI_TIMEOUT_SECS", bad)]));
            assert_eq!(
                result,
                Err(ConfigError::InvalidTimeout {
                    name: "CLE_DU_TEMPS_AI_TIMEOUT_SECS",
                    value: bad.to_string(),
                })
            );
        }
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = AiConfig {
            api_key: Some("super-secret".to_string()),
            ..AiConfig::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
