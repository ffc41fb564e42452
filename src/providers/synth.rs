//! Mock-data synthesis for fields a provider does not supply.
//!
//! TheMealDB has no cook times, servings, ratings or nutrition, so those
//! fields are filled with random values in fixed ranges. This mirrors the
//! catalog's documented behavior and is intentional, not a placeholder for
//! real data.

use rand::Rng;

use crate::model::Difficulty;

/// Uniform in [15, 75) minutes.
pub fn cook_time_minutes() -> u32 {
    rand::rng().random_range(15..75)
}

/// Uniform in [2, 8) servings.
pub fn servings() -> u32 {
    rand::rng().random_range(2..8)
}

/// Uniform in [3.0, 5.0), rounded to one decimal.
pub fn rating() -> f32 {
    round_to_tenth(rand::rng().random_range(3.0..5.0))
}

/// Uniform over the three difficulty levels.
pub fn difficulty() -> Difficulty {
    match rand::rng().random_range(0..3) {
        0 => Difficulty::Easy,
        1 => Difficulty::Medium,
        _ => Difficulty::Hard,
    }
}

/// Uniform in [200, 600) kcal.
pub fn calories() -> u32 {
    rand::rng().random_range(200..600)
}

pub fn round_to_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}
