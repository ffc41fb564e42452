use std::time::Duration;

use log::{info, warn};

use crate::error::FetchError;
use crate::model::Recipe;
use crate::providers::{MealDbProvider, ProviderSelection, RecipeSource, SpoonacularProvider};

/// Fetch recipes from the selected provider, falling back to the free
/// default when a premium provider fails.
///
/// TheMealDB is the default and has no further fallback; its failures
/// surface directly. Any failure of another provider, including a missing
/// credential, is retried exactly once against TheMealDB with the same
/// query and limit.
pub async fn fetch_recipes(
    query: &str,
    limit: usize,
    selection: &ProviderSelection,
    timeout: Option<Duration>,
) -> Result<Vec<Recipe>, FetchError> {
    match selection {
        ProviderSelection::MealDb => {
            MealDbProvider::new(timeout).fetch(query, limit).await
        }
        ProviderSelection::Spoonacular { api_key } => {
            let premium = SpoonacularProvider::new(api_key.clone(), timeout);
            let free = MealDbProvider::new(timeout);
            fetch_with_fallback(&premium, &free, query, limit).await
        }
    }
}

/// Try `primary`, and on any error retry once against `fallback`. No
/// retries beyond that single switch, no backoff.
pub async fn fetch_with_fallback(
    primary: &dyn RecipeSource,
    fallback: &dyn RecipeSource,
    query: &str,
    limit: usize,
) -> Result<Vec<Recipe>, FetchError> {
    match primary.fetch(query, limit).await {
        Ok(recipes) => {
            info!(
                "Fetched {} recipes from {}",
                recipes.len(),
                primary.provider_name()
            );
            Ok(recipes)
        }
        Err(e) => {
            warn!(
                "{} failed ({}), falling back to {}",
                primary.provider_name(),
                e,
                fallback.provider_name()
            );
            fallback.fetch(query, limit).await
        }
    }
}
