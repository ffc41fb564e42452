use serde::{Deserialize, Serialize};
use std::fmt;

/// Title used when a provider record carries no name.
pub const PLACEHOLDER_TITLE: &str = "Recipe Title";

/// Image URL used when a provider record carries no thumbnail.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300";

/// Rough effort classification shown next to each recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Classify by total cook time: up to 30 minutes is easy, up to an
    /// hour medium, anything longer hard.
    pub fn from_cook_time(minutes: u32) -> Self {
        if minutes <= 30 {
            Difficulty::Easy
        } else if minutes <= 60 {
            Difficulty::Medium
        } else {
            Difficulty::Hard
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        write!(f, "{}", label)
    }
}

/// A recipe normalized into a provider-agnostic shape.
///
/// `id` is only unique within a single fetch batch; there is no stable
/// identity across fetches or across providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub image: String,
    pub ready_in_minutes: u32,
    pub servings: u32,
    pub rating: f32,
    pub is_favorite: bool,
    pub difficulty: Difficulty,
    pub calories: u32,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub cuisine: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vegetarian: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vegan: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gluten_free: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dairy_free: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_from_cook_time_boundaries() {
        assert_eq!(Difficulty::from_cook_time(15), Difficulty::Easy);
        assert_eq!(Difficulty::from_cook_time(30), Difficulty::Easy);
        assert_eq!(Difficulty::from_cook_time(31), Difficulty::Medium);
        assert_eq!(Difficulty::from_cook_time(60), Difficulty::Medium);
        assert_eq!(Difficulty::from_cook_time(61), Difficulty::Hard);
    }

    #[test]
    fn test_difficulty_display() {
        assert_eq!(Difficulty::Easy.to_string(), "Easy");
        assert_eq!(Difficulty::Medium.to_string(), "Medium");
        assert_eq!(Difficulty::Hard.to_string(), "Hard");
    }
}
