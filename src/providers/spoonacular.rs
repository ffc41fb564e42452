use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::error::FetchError;
use crate::model::{Difficulty, Recipe, PLACEHOLDER_IMAGE, PLACEHOLDER_TITLE};
use crate::providers::{synth, RecipeSource};

const SPOONACULAR_BASE_URL: &str = "https://api.spoonacular.com/recipes";

/// Premium recipe provider backed by Spoonacular. Requires an API key;
/// fetches fail with `MissingCredential` before any request when the key
/// is absent.
pub struct SpoonacularProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Option<Vec<SpoonacularRecipe>>,
}

#[derive(Debug, Deserialize)]
struct RandomResponse {
    recipes: Option<Vec<SpoonacularRecipe>>,
}

/// Raw Spoonacular record. Much richer than TheMealDB: structured
/// instructions, nutrition and dietary flags come straight from the API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpoonacularRecipe {
    id: i64,
    title: Option<String>,
    image: Option<String>,
    ready_in_minutes: Option<u32>,
    servings: Option<u32>,
    spoonacular_score: Option<f32>,
    extended_ingredients: Option<Vec<ExtendedIngredient>>,
    analyzed_instructions: Option<Vec<AnalyzedInstructions>>,
    instructions: Option<String>,
    nutrition: Option<Nutrition>,
    cuisines: Option<Vec<String>>,
    dish_types: Option<Vec<String>>,
    diets: Option<Vec<String>>,
    vegetarian: Option<bool>,
    vegan: Option<bool>,
    gluten_free: Option<bool>,
    dairy_free: Option<bool>,
    source_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExtendedIngredient {
    original: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnalyzedInstructions {
    steps: Option<Vec<InstructionStep>>,
}

#[derive(Debug, Deserialize)]
struct InstructionStep {
    step: String,
}

#[derive(Debug, Deserialize)]
struct Nutrition {
    nutrients: Option<Vec<Nutrient>>,
}

#[derive(Debug, Deserialize)]
struct Nutrient {
    name: String,
    amount: f32,
}

impl SpoonacularRecipe {
    fn ingredient_lines(&self) -> Vec<String> {
        self.extended_ingredients
            .iter()
            .flatten()
            .filter_map(|ingredient| ingredient.original.clone())
            .collect()
    }

    /// Structured steps when the API analyzed them, then the flat
    /// `instructions` string split on periods, then a pointer at the
    /// source.
    fn instruction_steps(&self) -> Vec<String> {
        let analyzed: Vec<String> = self
            .analyzed_instructions
            .iter()
            .flatten()
            .next()
            .and_then(|block| block.steps.as_ref())
            .map(|steps| steps.iter().map(|s| s.step.clone()).collect())
            .unwrap_or_default();
        if !analyzed.is_empty() {
            return analyzed;
        }

        let flat: Vec<String> = self
            .instructions
            .as_deref()
            .unwrap_or_default()
            .split('.')
            .map(str::trim)
            .filter(|step| !step.is_empty())
            .map(str::to_string)
            .collect();
        if !flat.is_empty() {
            return flat;
        }

        vec!["Check source for instructions".to_string()]
    }

    fn calories(&self) -> u32 {
        self.nutrition
            .as_ref()
            .and_then(|nutrition| nutrition.nutrients.as_ref())
            .and_then(|nutrients| nutrients.iter().find(|n| n.name == "Calories"))
            .map(|n| n.amount.round() as u32)
            .unwrap_or_else(synth::calories)
    }

    fn normalize(self) -> Recipe {
        let difficulty = match self.ready_in_minutes {
            Some(minutes) => Difficulty::from_cook_time(minutes),
            None => synth::difficulty(),
        };
        let rating = self
            .spoonacular_score
            .map(|score| synth::round_to_tenth(score / 20.0))
            .unwrap_or(4.0);
        let ingredients = self.ingredient_lines();
        let instructions = self.instruction_steps();
        let calories = self.calories();

        let cuisines = self.cuisines.unwrap_or_default();
        let cuisine = cuisines
            .first()
            .cloned()
            .unwrap_or_else(|| "International".to_string());
        let mut tags = cuisines;
        tags.extend(self.dish_types.unwrap_or_default());
        tags.extend(self.diets.unwrap_or_default());

        Recipe {
            id: self.id,
            title: self.title.unwrap_or_else(|| PLACEHOLDER_TITLE.to_string()),
            image: self.image.unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            ready_in_minutes: self.ready_in_minutes.unwrap_or(30),
            servings: self.servings.unwrap_or(4),
            rating,
            is_favorite: false,
            difficulty,
            calories,
            ingredients,
            instructions,
            cuisine,
            tags,
            video: None,
            source_url: self.source_url,
            vegetarian: self.vegetarian,
            vegan: self.vegan,
            gluten_free: self.gluten_free,
            dairy_free: self.dairy_free,
        }
    }
}

impl SpoonacularProvider {
    pub fn new(api_key: Option<String>, timeout: Option<Duration>) -> Self {
        Self::with_base_url_and_timeout(api_key, SPOONACULAR_BASE_URL.to_string(), timeout)
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: Option<String>, base_url: String) -> Self {
        Self::with_base_url_and_timeout(api_key, base_url, None)
    }

    fn with_base_url_and_timeout(
        api_key: Option<String>,
        base_url: String,
        timeout: Option<Duration>,
    ) -> Self {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (compatible; RecipeScoutBot/1.0)")
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url,
            api_key,
        }
    }

    async fn get_raw(&self, query: &str, limit: usize, api_key: &str) -> Result<Vec<SpoonacularRecipe>, FetchError> {
        let limit = limit.to_string();
        let request = if query.is_empty() {
            self.client
                .get(format!("{}/random", self.base_url))
                .query(&[("number", limit.as_str()), ("apiKey", api_key)])
        } else {
            self.client.get(format!("{}/complexSearch", self.base_url)).query(&[
                ("query", query),
                ("number", limit.as_str()),
                ("addRecipeInformation", "true"),
                ("fillIngredients", "true"),
                ("apiKey", api_key),
            ])
        };

        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::PAYMENT_REQUIRED {
            return Err(FetchError::QuotaExceeded("Spoonacular"));
        }
        if !status.is_success() {
            return Err(FetchError::Provider(format!(
                "Spoonacular API error: {}",
                status.as_u16()
            )));
        }

        let body = response.text().await?;
        let recipes = if query.is_empty() {
            serde_json::from_str::<RandomResponse>(&body)
                .map_err(|e| FetchError::Parse(format!("Spoonacular random: {}", e)))?
                .recipes
        } else {
            serde_json::from_str::<SearchResponse>(&body)
                .map_err(|e| FetchError::Parse(format!("Spoonacular search: {}", e)))?
                .results
        };

        match recipes {
            Some(recipes) if !recipes.is_empty() => Ok(recipes),
            _ => Err(FetchError::Provider("No recipes found".to_string())),
        }
    }
}

#[async_trait]
impl RecipeSource for SpoonacularProvider {
    fn provider_name(&self) -> &'static str {
        "Spoonacular"
    }

    async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<Recipe>, FetchError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(FetchError::MissingCredential("Spoonacular"))?;

        let raw = self.get_raw(query, limit, api_key).await?;
        debug!("Spoonacular returned {} raw recipes", raw.len());

        Ok(raw.into_iter().map(SpoonacularRecipe::normalize).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe_from_json(json: &str) -> SpoonacularRecipe {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_difficulty_derived_from_cook_time() {
        let recipe = recipe_from_json(r#"{"id": 1, "title": "Salad", "readyInMinutes": 20}"#);
        assert_eq!(recipe.normalize().difficulty, Difficulty::Easy);

        let recipe = recipe_from_json(r#"{"id": 2, "title": "Stew", "readyInMinutes": 45}"#);
        assert_eq!(recipe.normalize().difficulty, Difficulty::Medium);

        let recipe = recipe_from_json(r#"{"id": 3, "title": "Roast", "readyInMinutes": 90}"#);
        assert_eq!(recipe.normalize().difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_rating_scaled_from_score() {
        let recipe = recipe_from_json(r#"{"id": 1, "title": "Pie", "spoonacularScore": 86.0}"#);
        assert_eq!(recipe.normalize().rating, 4.3);

        let recipe = recipe_from_json(r#"{"id": 2, "title": "Cake"}"#);
        assert_eq!(recipe.normalize().rating, 4.0);
    }

    #[test]
    fn test_instruction_fallback_chain() {
        let analyzed = recipe_from_json(
            r#"{
                "id": 1,
                "title": "Pasta",
                "analyzedInstructions": [{"steps": [{"step": "Boil water"}, {"step": "Add pasta"}]}],
                "instructions": "ignored. text."
            }"#,
        );
        assert_eq!(
            analyzed.normalize().instructions,
            vec!["Boil water", "Add pasta"]
        );

        let flat = recipe_from_json(
            r#"{"id": 2, "title": "Soup", "instructions": "Chop onions. Simmer gently."}"#,
        );
        assert_eq!(
            flat.normalize().instructions,
            vec!["Chop onions", "Simmer gently"]
        );

        let none = recipe_from_json(r#"{"id": 3, "title": "Mystery"}"#);
        assert_eq!(
            none.normalize().instructions,
            vec!["Check source for instructions"]
        );
    }

    #[test]
    fn test_cuisine_and_tags_merge() {
        let recipe = recipe_from_json(
            r#"{
                "id": 4,
                "title": "Curry",
                "cuisines": ["Indian"],
                "dishTypes": ["dinner"],
                "diets": ["vegetarian"],
                "vegetarian": true
            }"#,
        );
        let normalized = recipe.normalize();

        assert_eq!(normalized.cuisine, "Indian");
        assert_eq!(normalized.tags, vec!["Indian", "dinner", "vegetarian"]);
        assert_eq!(normalized.vegetarian, Some(true));
    }

    #[test]
    fn test_calories_from_nutrition() {
        let recipe = recipe_from_json(
            r#"{
                "id": 5,
                "title": "Bowl",
                "nutrition": {"nutrients": [{"name": "Fat", "amount": 10.0}, {"name": "Calories", "amount": 412.7}]}
            }"#,
        );
        assert_eq!(recipe.normalize().calories, 413);
    }

    #[test]
    fn test_defaults_when_fields_absent() {
        let recipe = recipe_from_json(r#"{"id": 6}"#);
        let normalized = recipe.normalize();

        assert_eq!(normalized.title, PLACEHOLDER_TITLE);
        assert_eq!(normalized.image, PLACEHOLDER_IMAGE);
        assert_eq!(normalized.ready_in_minutes, 30);
        assert_eq!(normalized.servings, 4);
        assert_eq!(normalized.cuisine, "International");
        assert!((200..600).contains(&normalized.calories));
    }
}
