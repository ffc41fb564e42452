use std::time::Duration;

use crate::config::{ProviderKind, ScoutConfig};
use crate::error::FetchError;
use crate::model::Recipe;
use crate::providers::{fetch_recipes, ProviderSelection};

/// Builder for configuring and executing a recipe search
#[derive(Debug, Default)]
pub struct RecipeSearchBuilder {
    query: Option<String>,
    limit: Option<usize>,
    provider: Option<ProviderKind>,
    api_key: Option<String>,
    timeout: Option<Duration>,
}

impl RecipeSearchBuilder {
    /// Set the search query
    ///
    /// Leaving the query unset (or setting it to an empty string) asks the
    /// provider for random recipes instead of a search.
    ///
    /// # Example
    /// ```
    /// use recipe_scout::RecipeSearch;
    ///
    /// let builder = RecipeSearch::builder()
    ///     .query("pasta");
    /// ```
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Set how many recipes to ask the provider for
    ///
    /// # Example
    /// ```
    /// use recipe_scout::RecipeSearch;
    ///
    /// let builder = RecipeSearch::builder()
    ///     .query("pasta")
    ///     .limit(10);
    /// ```
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Pick the provider explicitly instead of using the configured one
    ///
    /// # Example
    /// ```
    /// use recipe_scout::{ProviderKind, RecipeSearch};
    ///
    /// let builder = RecipeSearch::builder()
    ///     .query("pasta")
    ///     .provider(ProviderKind::Spoonacular)
    ///     .api_key("your-api-key");
    /// ```
    pub fn provider(mut self, provider: ProviderKind) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the API key for the premium provider
    ///
    /// This allows passing the key directly instead of relying on
    /// environment variables or config files.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set a timeout for HTTP requests
    ///
    /// # Example
    /// ```
    /// use recipe_scout::RecipeSearch;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeSearch::builder()
    ///     .query("pasta")
    ///     .timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Execute the search against the resolved provider
    ///
    /// Settings not given on the builder fall back to the loaded
    /// configuration, then to defaults. The provider fallback applies as
    /// usual: a failing premium provider is retried once against
    /// TheMealDB.
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_scout::RecipeSearch;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let recipes = RecipeSearch::builder()
    ///     .query("pasta")
    ///     .limit(10)
    ///     .fetch()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn fetch(self) -> Result<Vec<Recipe>, FetchError> {
        let base = ScoutConfig::load().unwrap_or_default();

        let provider = self.provider.unwrap_or(base.provider);
        let config = ScoutConfig {
            provider,
            spoonacular_api_key: self.api_key.or(base.spoonacular_api_key),
            results_limit: self.limit.unwrap_or(base.results_limit),
            timeout: self
                .timeout
                .map(|duration| duration.as_secs())
                .unwrap_or(base.timeout),
        };

        let selection: ProviderSelection = config.selection();
        fetch_recipes(
            self.query.as_deref().unwrap_or(""),
            config.results_limit,
            &selection,
            Some(Duration::from_secs(config.timeout)),
        )
        .await
    }
}

/// Main entry point for the builder API
pub struct RecipeSearch;

impl RecipeSearch {
    /// Creates a new builder for searching recipes
    ///
    /// # Example
    /// ```
    /// use recipe_scout::RecipeSearch;
    ///
    /// let builder = RecipeSearch::builder();
    /// ```
    pub fn builder() -> RecipeSearchBuilder {
        RecipeSearchBuilder::default()
    }
}
