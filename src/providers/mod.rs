mod google;
mod prompt;

pub use google::GoogleProvider;
pub use prompt::{
    build_meal_plan_prompt, build_natural_prompt, build_structured_prompt, RECIPE_JSON_PROMPT,
};

use crate::config::GenerationConfig;
use crate::error::ChefError;
use async_trait::async_trait;

/// A text generation backend
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "google")
    fn provider_name(&self) -> &str;

    /// Send one prompt and return the generated text.
    ///
    /// A response without text is `Ok("")`; only transport failures and
    /// non-success statuses are errors.
    async fn generate(&self, prompt: &str) -> Result<String, ChefError>;
}

/// Create the provider named in the configuration
pub fn create_provider(config: &GenerationConfig) -> Result<Box<dyn LlmProvider>, ChefError> {
    match config.provider.as_str() {
        "google" | "gemini" => Ok(Box::new(GoogleProvider::new(config)?)),
        other => Err(ChefError::UnknownProvider(other.to_string())),
    }
}
