use thiserror::Error;

/// Errors that can occur while generating, parsing or storing recipes
#[derive(Error, Debug)]
pub enum ChefError {
    /// The request to the generation backend could not be sent or read
    #[error("Failed to reach generation backend: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The generation backend answered with a non-success status
    #[error("Generation backend returned status {status}")]
    TransportError { status: u16 },

    /// Generated text could not be turned into recipes
    #[error("Failed to parse recipe: {0}")]
    ParseError(String),

    /// Invalid JSON after sanitizing
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Reading or writing persisted state failed
    #[error("Storage error: {0}")]
    StorageError(#[from] std::io::Error),

    /// No API key configured for the generation backend
    #[error("Missing API key: set generation.api_key, GEMINI_API_KEY or GOOGLE_API_KEY")]
    MissingApiKey,

    /// The configured provider name is not supported
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// A search or generation was requested without ingredients
    #[error("At least one ingredient is required")]
    EmptyIngredients,

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
