mod fallback;
mod mealdb;
mod spoonacular;
pub(crate) mod synth;

pub use fallback::{fetch_recipes, fetch_with_fallback};
pub use mealdb::MealDbProvider;
pub use spoonacular::SpoonacularProvider;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::model::Recipe;

/// Unified trait for recipe API providers
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Get the provider name (e.g., "TheMealDB", "Spoonacular")
    fn provider_name(&self) -> &'static str;

    /// Fetch up to `limit` recipes matching `query`, normalized into the
    /// common `Recipe` shape. An empty query asks for random recipes.
    async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<Recipe>, FetchError>;
}

/// Which provider a fetch should go to, with its credential when one is
/// needed. Dispatched through a single fetch function rather than picked
/// from a registry; the fallback is then just a retry with the free
/// variant.
#[derive(Debug, Clone)]
pub enum ProviderSelection {
    MealDb,
    Spoonacular { api_key: Option<String> },
}

impl ProviderSelection {
    /// TheMealDB is the free default every other provider falls back to.
    pub fn is_default(&self) -> bool {
        matches!(self, ProviderSelection::MealDb)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProviderSelection::MealDb => "TheMealDB",
            ProviderSelection::Spoonacular { .. } => "Spoonacular",
        }
    }
}
