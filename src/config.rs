use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::providers::ProviderSelection;

/// Which recipe API backs the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// TheMealDB, free and keyless
    MealDb,
    /// Spoonacular, requires an API key
    Spoonacular,
}

/// Main search configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct ScoutConfig {
    /// Provider to fetch recipes from
    #[serde(default = "default_provider")]
    pub provider: ProviderKind,
    /// API key for Spoonacular (can also be set via environment variable)
    #[serde(default)]
    pub spoonacular_api_key: Option<String>,
    /// How many recipes a single fetch asks for
    #[serde(default = "default_results_limit")]
    pub results_limit: usize,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            spoonacular_api_key: None,
            results_limit: default_results_limit(),
            timeout: default_timeout(),
        }
    }
}

// Default value functions
fn default_provider() -> ProviderKind {
    ProviderKind::MealDb
}

fn default_results_limit() -> usize {
    50
}

fn default_timeout() -> u64 {
    30
}

impl ScoutConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with SCOUT__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: SCOUT__RESULTS_LIMIT
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("SCOUT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Resolve the configured provider into a fetch selection.
    ///
    /// The Spoonacular key is taken from the config first, then from the
    /// SPOONACULAR_API_KEY environment variable. A missing key is not an
    /// error here; the fetch itself reports `MissingCredential` so the
    /// provider fallback still gets a chance to run.
    pub fn selection(&self) -> ProviderSelection {
        match self.provider {
            ProviderKind::MealDb => ProviderSelection::MealDb,
            ProviderKind::Spoonacular => ProviderSelection::Spoonacular {
                api_key: self
                    .spoonacular_api_key
                    .clone()
                    .or_else(|| std::env::var("SPOONACULAR_API_KEY").ok()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = ScoutConfig::default();
        assert_eq!(config.provider, ProviderKind::MealDb);
        assert!(config.spoonacular_api_key.is_none());
        assert_eq!(config.results_limit, 50);
        assert_eq!(config.timeout, 30);
    }

    #[test]
    fn test_selection_for_mealdb() {
        let config = ScoutConfig::default();
        assert!(matches!(config.selection(), ProviderSelection::MealDb));
    }

    #[test]
    fn test_selection_for_spoonacular_with_key() {
        let config = ScoutConfig {
            provider: ProviderKind::Spoonacular,
            spoonacular_api_key: Some("test-key".to_string()),
            ..ScoutConfig::default()
        };

        match config.selection() {
            ProviderSelection::Spoonacular { api_key } => {
                assert_eq!(api_key.as_deref(), Some("test-key"));
            }
            ProviderSelection::MealDb => panic!("expected Spoonacular selection"),
        }
    }

    #[test]
    fn test_provider_kind_deserializes_lowercase() {
        let kind: ProviderKind = serde_json::from_str("\"mealdb\"").unwrap();
        assert_eq!(kind, ProviderKind::MealDb);
        let kind: ProviderKind = serde_json::from_str("\"spoonacular\"").unwrap();
        assert_eq!(kind, ProviderKind::Spoonacular);
    }
}
