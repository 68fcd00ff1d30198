use std::path::PathBuf;

use crate::app::SmartChef;
use crate::config::ChefConfig;
use crate::error::ChefError;
use crate::generator::RecipeGenerator;
use crate::providers::{create_provider, LlmProvider};
use crate::storage::{FileStore, KeyValueStore};

/// Builder for assembling a [`SmartChef`] session
///
/// Anything not set explicitly comes from the loaded configuration.
#[derive(Default)]
pub struct SmartChefBuilder {
    config: Option<ChefConfig>,
    provider: Option<Box<dyn LlmProvider>>,
    storage: Option<Box<dyn KeyValueStore>>,
    api_key: Option<String>,
    model: Option<String>,
    storage_dir: Option<PathBuf>,
}

impl SmartChefBuilder {
    /// Use this configuration instead of loading one from the environment
    pub fn config(mut self, config: ChefConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use a ready-made backend instead of creating one from configuration
    ///
    /// # Example
    /// ```no_run
    /// use smartchef::{GoogleProvider, SmartChef};
    ///
    /// let provider = GoogleProvider::with_base_url(
    ///     "key".to_string(),
    ///     "http://localhost:8080".to_string(),
    ///     "gemini-1.5-flash-latest".to_string(),
    /// );
    /// let builder = SmartChef::builder().provider(Box::new(provider));
    /// ```
    pub fn provider(mut self, provider: Box<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Persist favorites and preferences in `storage`
    pub fn storage(mut self, storage: Box<dyn KeyValueStore>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Set the API key for the configured backend
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name for the configured backend
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Keep persisted state as files in `dir`
    pub fn storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = Some(dir.into());
        self
    }

    /// Assemble the session
    ///
    /// # Errors
    /// Returns `ChefError` if the configuration cannot be loaded, the
    /// configured provider is unknown, or no API key is available.
    pub fn build(self) -> Result<SmartChef, ChefError> {
        let needs_config = self.config.is_none()
            && (self.provider.is_none() || (self.storage.is_none() && self.storage_dir.is_none()));
        let mut config = match self.config {
            Some(config) => config,
            None if needs_config => ChefConfig::load()?,
            None => ChefConfig::default(),
        };

        if let Some(key) = self.api_key {
            config.generation.api_key = Some(key);
        }
        if let Some(model) = self.model {
            config.generation.model = model;
        }
        if let Some(dir) = self.storage_dir {
            config.storage.dir = dir;
        }

        let provider = match self.provider {
            Some(provider) => provider,
            None => create_provider(&config.generation)?,
        };
        let storage = self
            .storage
            .unwrap_or_else(|| Box::new(FileStore::new(config.storage.dir.clone())));

        Ok(SmartChef::new(RecipeGenerator::new(provider), storage))
    }
}

impl SmartChef {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use smartchef::SmartChef;
    ///
    /// let builder = SmartChef::builder().storage_dir(".smartchef");
    /// ```
    pub fn builder() -> SmartChefBuilder {
        SmartChefBuilder::default()
    }
}
