//! Pure, synchronous filtering over an in-memory recipe list.

use crate::model::Recipe;

/// Select the recipes matching `query`, preserving the input order.
///
/// A query that is empty after trimming returns the whole list. Matching
/// is a case-insensitive substring test against the title, the cuisine,
/// any tag, or any ingredient line. Pure inclusion, no ranking.
pub fn filter_recipes(recipes: &[Recipe], query: &str) -> Vec<Recipe> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return recipes.to_vec();
    }

    recipes
        .iter()
        .filter(|recipe| matches_query(recipe, &query))
        .cloned()
        .collect()
}

fn matches_query(recipe: &Recipe, query_lower: &str) -> bool {
    recipe.title.to_lowercase().contains(query_lower)
        || recipe.cuisine.to_lowercase().contains(query_lower)
        || recipe
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(query_lower))
        || recipe
            .ingredients
            .iter()
            .any(|ingredient| ingredient.to_lowercase().contains(query_lower))
}

/// Flip the favorite flag on every entry with the given id, leaving the
/// rest untouched. Ids are only unique within one fetch batch, so all
/// matches flip together.
pub fn toggle_favorite(recipes: &mut [Recipe], id: i64) {
    for recipe in recipes.iter_mut().filter(|recipe| recipe.id == id) {
        recipe.is_favorite = !recipe.is_favorite;
    }
}
