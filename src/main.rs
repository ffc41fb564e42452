use std::env;

use log::warn;

use recipe_scout::{search_recipes_with_config, RecipeCatalog, ScoutConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Optional free-text query from the command line; no query lists
    // random recipes
    let args: Vec<String> = env::args().collect();
    let query = args.get(1).cloned().unwrap_or_default();

    let config = ScoutConfig::load().unwrap_or_else(|e| {
        warn!("Using default configuration: {}", e);
        ScoutConfig::default()
    });

    let mut catalog = RecipeCatalog::new();
    catalog.set_query(&query);

    let ticket = catalog.begin_fetch();
    let recipes = search_recipes_with_config(&query, &config).await?;
    catalog.complete_fetch(ticket, recipes);

    for recipe in catalog.filtered() {
        println!(
            "{:<40} {:>3} min  {} servings  {:.1}*  {:<6}  {}",
            recipe.title,
            recipe.ready_in_minutes,
            recipe.servings,
            recipe.rating,
            recipe.difficulty.to_string(),
            recipe.cuisine,
        );
    }

    let stats = catalog.stats();
    println!(
        "\n{} recipes, avg rating {:.1}, avg cook time {} min, avg {} kcal",
        stats.total, stats.avg_rating, stats.avg_cook_time, stats.avg_calories
    );

    Ok(())
}
