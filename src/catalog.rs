//! Client-side catalog state: the fetched list, the filtered view, the
//! current query and the favorite flags, owned by one controller object.

use log::debug;

use crate::filter::{filter_recipes, toggle_favorite};
use crate::model::Recipe;
use crate::providers::synth::round_to_tenth;

/// Aggregates over the currently filtered view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogStats {
    pub total: usize,
    pub favorites: usize,
    pub avg_rating: f32,
    pub avg_cook_time: u32,
    pub avg_calories: u32,
}

/// Owns all mutable search state so rendering logic can borrow it instead
/// of sharing ambient globals.
///
/// Fetches are identified by a monotonic sequence number: callers take a
/// ticket from [`begin_fetch`](RecipeCatalog::begin_fetch) before starting
/// the network call and hand it back to
/// [`complete_fetch`](RecipeCatalog::complete_fetch). A completion whose
/// ticket is no longer the newest is discarded, so a slow stale response
/// can never overwrite the results of a newer search.
#[derive(Debug, Default)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
    filtered: Vec<Recipe>,
    query: String,
    latest_fetch: u64,
}

impl RecipeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new intended fetch and get its ticket. Any fetch begun
    /// earlier becomes stale immediately.
    pub fn begin_fetch(&mut self) -> u64 {
        self.latest_fetch += 1;
        self.latest_fetch
    }

    /// Accept a fetched batch if `ticket` still identifies the newest
    /// fetch. Returns false (and changes nothing) for stale completions.
    pub fn complete_fetch(&mut self, ticket: u64, recipes: Vec<Recipe>) -> bool {
        if ticket != self.latest_fetch {
            debug!(
                "Discarding stale fetch {} (newest is {})",
                ticket, self.latest_fetch
            );
            return false;
        }

        self.filtered = filter_recipes(&recipes, &self.query);
        self.recipes = recipes;
        true
    }

    /// Store the query and recompute the filtered view.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.filtered = filter_recipes(&self.recipes, &self.query);
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Flip the favorite flag for `id` in both the full list and the
    /// filtered view so the two stay consistent.
    pub fn toggle_favorite(&mut self, id: i64) {
        toggle_favorite(&mut self.recipes, id);
        toggle_favorite(&mut self.filtered, id);
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn filtered(&self) -> &[Recipe] {
        &self.filtered
    }

    /// Favorites across the full list, regardless of the current query.
    pub fn favorites(&self) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|recipe| recipe.is_favorite)
            .collect()
    }

    /// Summary numbers over the filtered view; all zeros when it is empty.
    pub fn stats(&self) -> CatalogStats {
        let total = self.filtered.len();
        if total == 0 {
            return CatalogStats {
                total: 0,
                favorites: 0,
                avg_rating: 0.0,
                avg_cook_time: 0,
                avg_calories: 0,
            };
        }

        let favorites = self
            .filtered
            .iter()
            .filter(|recipe| recipe.is_favorite)
            .count();
        let rating_sum: f32 = self.filtered.iter().map(|recipe| recipe.rating).sum();
        let cook_time_sum: u64 = self
            .filtered
            .iter()
            .map(|recipe| u64::from(recipe.ready_in_minutes))
            .sum();
        let calorie_sum: u64 = self
            .filtered
            .iter()
            .map(|recipe| u64::from(recipe.calories))
            .sum();

        CatalogStats {
            total,
            favorites,
            avg_rating: round_to_tenth(rating_sum / total as f32),
            avg_cook_time: (cook_time_sum as f64 / total as f64).round() as u32,
            avg_calories: (calorie_sum as f64 / total as f64).round() as u32,
        }
    }
}
