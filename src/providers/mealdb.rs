use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::error::FetchError;
use crate::model::{Recipe, PLACEHOLDER_IMAGE, PLACEHOLDER_TITLE};
use crate::providers::{synth, RecipeSource};

const MEALDB_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// TheMealDB random endpoint returns one meal per request, so a random
/// batch is capped to keep the request fan-out bounded.
const MAX_RANDOM_BATCH: usize = 50;

/// Free, keyless recipe provider backed by TheMealDB.
pub struct MealDbProvider {
    client: Client,
    base_url: String,
}

/// Envelope every TheMealDB endpoint uses. `meals` is JSON null when the
/// search matched nothing.
#[derive(Debug, Deserialize)]
struct MealDbResponse {
    meals: Option<Vec<MealDbMeal>>,
}

/// Raw TheMealDB record. `search.php` returns the full shape;
/// `filter.php` only fills id, name and thumbnail. The twenty numbered
/// ingredient/measure pairs live in `extra`.
#[derive(Debug, Deserialize)]
struct MealDbMeal {
    #[serde(rename = "idMeal")]
    id: String,
    #[serde(rename = "strMeal")]
    name: Option<String>,
    #[serde(rename = "strMealThumb")]
    thumbnail: Option<String>,
    #[serde(rename = "strInstructions")]
    instructions: Option<String>,
    #[serde(rename = "strArea")]
    area: Option<String>,
    #[serde(rename = "strCategory")]
    category: Option<String>,
    #[serde(rename = "strYoutube")]
    youtube: Option<String>,
    #[serde(rename = "strSource")]
    source: Option<String>,
    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

impl MealDbMeal {
    /// Collect the `strIngredientN`/`strMeasureN` pairs into display
    /// lines, skipping blank slots and prefixing the measure when one is
    /// given.
    fn ingredient_lines(&self) -> Vec<String> {
        (1..=20)
            .filter_map(|i| {
                let name = self
                    .extra
                    .get(&format!("strIngredient{}", i))
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|name| !name.is_empty())?;

                let measure = self
                    .extra
                    .get(&format!("strMeasure{}", i))
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .unwrap_or("");

                if measure.is_empty() {
                    Some(name.to_string())
                } else {
                    Some(format!("{} {}", measure, name))
                }
            })
            .collect()
    }

    fn instruction_steps(&self) -> Vec<String> {
        let steps: Vec<String> = self
            .instructions
            .as_deref()
            .unwrap_or_default()
            .lines()
            .map(str::trim)
            .filter(|step| !step.is_empty())
            .map(str::to_string)
            .collect();

        if steps.is_empty() {
            vec!["Instructions not available".to_string()]
        } else {
            steps
        }
    }

    /// Normalize into the provider-agnostic shape. TheMealDB carries no
    /// cook time, servings, rating or nutrition, so those are synthesized.
    fn normalize(self) -> Result<Recipe, FetchError> {
        let id = self
            .id
            .parse::<i64>()
            .map_err(|_| FetchError::Parse(format!("non-numeric meal id: {}", self.id)))?;

        let ready_in_minutes = synth::cook_time_minutes();
        let ingredients = self.ingredient_lines();
        let instructions = self.instruction_steps();

        let cuisine = self
            .area
            .clone()
            .filter(|area| !area.is_empty())
            .unwrap_or_else(|| "International".to_string());
        let tags = [self.category.clone(), self.area.clone()]
            .into_iter()
            .flatten()
            .filter(|tag| !tag.is_empty())
            .collect();

        Ok(Recipe {
            id,
            title: self.name.unwrap_or_else(|| PLACEHOLDER_TITLE.to_string()),
            image: self
                .thumbnail
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            ready_in_minutes,
            servings: synth::servings(),
            rating: synth::rating(),
            is_favorite: false,
            difficulty: synth::difficulty(),
            calories: synth::calories(),
            ingredients,
            instructions,
            cuisine,
            tags,
            video: self.youtube.filter(|url| !url.is_empty()),
            source_url: self.source.filter(|url| !url.is_empty()),
            vegetarian: None,
            vegan: None,
            gluten_free: None,
            dairy_free: None,
        })
    }
}

impl MealDbProvider {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self::with_base_url_and_timeout(MEALDB_BASE_URL.to_string(), timeout)
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        Self::with_base_url_and_timeout(base_url, None)
    }

    fn with_base_url_and_timeout(base_url: String, timeout: Option<Duration>) -> Self {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (compatible; RecipeScoutBot/1.0)")
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, base_url }
    }

    async fn get_meals(&self, path: &str, params: &[(&str, &str)]) -> Result<Vec<MealDbMeal>, FetchError> {
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, path))
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Provider(format!(
                "TheMealDB API error: {}",
                status.as_u16()
            )));
        }

        let body = response.text().await?;
        let parsed: MealDbResponse = serde_json::from_str(&body)
            .map_err(|e| FetchError::Parse(format!("TheMealDB {}: {}", path, e)))?;

        Ok(parsed.meals.unwrap_or_default())
    }

    /// One `random.php` call, yielding at most one meal. Transport errors
    /// propagate; an unparseable body is dropped so the rest of the batch
    /// survives.
    async fn random_meal(&self) -> Result<Option<MealDbMeal>, FetchError> {
        let response = self
            .client
            .get(format!("{}/random.php", self.base_url))
            .send()
            .await?;

        let body = response.text().await?;
        match serde_json::from_str::<MealDbResponse>(&body) {
            Ok(parsed) => Ok(parsed.meals.unwrap_or_default().into_iter().next()),
            Err(e) => {
                debug!("Dropping unparseable random meal: {}", e);
                Ok(None)
            }
        }
    }

    /// Issue `limit` independent random-recipe requests concurrently.
    async fn fetch_random(&self, limit: usize) -> Result<Vec<MealDbMeal>, FetchError> {
        let batch_size = limit.min(MAX_RANDOM_BATCH);
        let requests = (0..batch_size).map(|_| self.random_meal());

        let mut meals = Vec::with_capacity(batch_size);
        for result in join_all(requests).await {
            if let Some(meal) = result? {
                meals.push(meal);
            }
        }
        Ok(meals)
    }

    /// Search by name and by primary ingredient, merge the two result
    /// sets and deduplicate by meal id. Name-search results come first
    /// and win ties.
    async fn fetch_search(&self, query: &str) -> Result<Vec<MealDbMeal>, FetchError> {
        let by_name = self.get_meals("search.php", &[("s", query)]).await?;
        let by_ingredient = self.get_meals("filter.php", &[("i", query)]).await?;

        let mut seen = HashSet::new();
        let merged = by_name
            .into_iter()
            .chain(by_ingredient)
            .filter(|meal| seen.insert(meal.id.clone()))
            .collect();
        Ok(merged)
    }
}

#[async_trait]
impl RecipeSource for MealDbProvider {
    fn provider_name(&self) -> &'static str {
        "TheMealDB"
    }

    async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<Recipe>, FetchError> {
        let meals = if query.is_empty() {
            self.fetch_random(limit).await?
        } else {
            self.fetch_search(query).await?
        };

        debug!("TheMealDB returned {} raw meals", meals.len());

        let mut recipes = Vec::with_capacity(meals.len());
        for meal in meals {
            match meal.normalize() {
                Ok(recipe) => recipes.push(recipe),
                Err(e) => warn!("Skipping malformed meal record: {}", e),
            }
        }
        Ok(recipes)
    }
}
