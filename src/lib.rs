pub mod catalog;
pub mod config;
pub mod debounce;
pub mod error;
pub mod filter;
pub mod model;
pub mod providers;

mod builder;

pub use builder::{RecipeSearch, RecipeSearchBuilder};
pub use catalog::{CatalogStats, RecipeCatalog};
pub use config::{ProviderKind, ScoutConfig};
pub use debounce::{Debouncer, TimerHandle, DEFAULT_DEBOUNCE};
pub use error::FetchError;
pub use filter::{filter_recipes, toggle_favorite};
pub use model::{Difficulty, Recipe};
pub use providers::{fetch_recipes, ProviderSelection};

use std::time::Duration;

/// Search recipes on the free default provider.
///
/// An empty query fetches random recipes instead. For provider selection,
/// credentials and timeouts use [`search_recipes_with_config`] or the
/// [`RecipeSearch`] builder.
pub async fn search_recipes(query: &str, limit: usize) -> Result<Vec<Recipe>, FetchError> {
    fetch_recipes(query, limit, &ProviderSelection::MealDb, None).await
}

/// Search recipes using a loaded configuration, with the one-shot
/// fallback to the free provider when the configured one fails.
pub async fn search_recipes_with_config(
    query: &str,
    config: &ScoutConfig,
) -> Result<Vec<Recipe>, FetchError> {
    fetch_recipes(
        query,
        config.results_limit,
        &config.selection(),
        Some(Duration::from_secs(config.timeout)),
    )
    .await
}
