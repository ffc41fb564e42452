use thiserror::Error;

/// Errors that can occur while fetching recipes from a provider
#[derive(Error, Debug)]
pub enum FetchError {
    /// The selected provider requires an API key that is not configured
    #[error("{0} API key required")]
    MissingCredential(&'static str),

    /// The provider signaled a rate or billing limit
    #[error("{0} API quota exceeded, please check your plan")]
    QuotaExceeded(&'static str),

    /// Any other non-success response, or a response with no recipes
    #[error("Provider error: {0}")]
    Provider(String),

    /// Transport-level failure talking to the provider
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider returned a body that could not be parsed
    #[error("Failed to parse provider response: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
