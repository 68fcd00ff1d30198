use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ChefConfig {
    /// Generation backend settings
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Where favorites and preferences are persisted
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Configuration for the text generation backend
#[derive(Debug, Deserialize, Clone)]
pub struct GenerationConfig {
    /// Backend name; only "google" is supported
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Model identifier (e.g., "gemini-1.5-flash-latest")
    #[serde(default = "default_model")]
    pub model: String,
    /// API key (can also be set via GEMINI_API_KEY or GOOGLE_API_KEY)
    pub api_key: Option<String>,
    /// Base URL for the API endpoint (for proxies and tests)
    pub base_url: Option<String>,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout in seconds; the transport default applies when unset
    pub timeout: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            api_key: None,
            base_url: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout: None,
        }
    }
}

impl GenerationConfig {
    /// Resolve the API key: config first, then GEMINI_API_KEY, then GOOGLE_API_KEY
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
    }
}

/// Configuration for persisted state
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding one JSON file per stored key
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
        }
    }
}

fn default_provider() -> String {
    "google".to_string()
}

fn default_model() -> String {
    "gemini-1.5-flash-latest".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".smartchef")
}

impl ChefConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with SMARTCHEF__ prefix
    /// 2. smartchef.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: SMARTCHEF__GENERATION__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`ChefConfig::load`] for the priority order.
pub fn load_config() -> Result<ChefConfig, ConfigError> {
    let settings = Config::builder()
        .add_source(File::with_name("smartchef").required(false))
        // Use double underscore for nested: SMARTCHEF__GENERATION__MODEL
        .add_source(
            Environment::with_prefix("SMARTCHEF")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let generation = GenerationConfig::default();
        assert_eq!(generation.provider, "google");
        assert_eq!(generation.model, "gemini-1.5-flash-latest");
        assert_eq!(generation.temperature, 0.7);
        assert_eq!(generation.max_tokens, 2048);
        assert!(generation.timeout.is_none());
        assert_eq!(StorageConfig::default().dir, PathBuf::from(".smartchef"));
    }

    #[test]
    fn test_configured_api_key_wins() {
        let generation = GenerationConfig {
            api_key: Some("from-config".to_string()),
            ..Default::default()
        };
        assert_eq!(generation.resolve_api_key().as_deref(), Some("from-config"));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: ChefConfig = Config::builder()
            .add_source(config::File::from_str(
                "[generation]\nmodel = \"gemini-2.0-flash\"\ntimeout = 20\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.generation.model, "gemini-2.0-flash");
        assert_eq!(config.generation.timeout, Some(20));
        assert_eq!(config.generation.provider, "google");
        assert_eq!(config.storage.dir, PathBuf::from(".smartchef"));
    }

    #[test]
    fn test_load_config_without_file() {
        assert!(!std::path::Path::new("smartchef.toml").exists());
        let config = load_config().unwrap();
        assert!(!config.generation.model.is_empty());
        assert!(config.generation.max_tokens > 0);
    }
}
