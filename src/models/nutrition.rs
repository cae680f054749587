//! Per-100g nutrient baseline
//!
//! One profile per dataset key, plus the fixed fallback used when nothing matches.

use serde::{Deserialize, Serialize};

/// Nutritional baseline per 100 grams
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NutrientProfile {
    pub calories: f64,
    pub total_fat: f64,     // grams
    pub saturated_fat: f64, // grams
    pub cholesterol: f64,   // milligrams
    pub sodium: f64,        // milligrams
    pub carbohydrates: f64, // grams
    pub fiber: f64,         // grams
    pub sugars: f64,        // grams
    pub protein: f64,       // grams
}

/// Profile used when a food resolves to nothing in the dataset
pub static DEFAULT_PROFILE: NutrientProfile = NutrientProfile {
    calories: 100.0,
    total_fat: 3.0,
    saturated_fat: 1.0,
    cholesterol: 20.0,
    sodium: 50.0,
    carbohydrates: 15.0,
    fiber: 1.5,
    sugars: 5.0,
    protein: 5.0,
};

impl NutrientProfile {
    /// Scale nutrient values by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            calories: self.calories * multiplier,
            total_fat: self.total_fat * multiplier,
            saturated_fat: self.saturated_fat * multiplier,
            cholesterol: self.cholesterol * multiplier,
            sodium: self.sodium * multiplier,
            carbohydrates: self.carbohydrates * multiplier,
            fiber: self.fiber * multiplier,
            sugars: self.sugars * multiplier,
            protein: self.protein * multiplier,
        }
    }

    /// Scale a per-100g profile to a serving in grams
    pub fn for_serving(&self, serving_grams: f64) -> Self {
        self.scale(serving_grams / 100.0)
    }
}

impl std::ops::Mul<f64> for NutrientProfile {
    type Output = NutrientProfile;

    fn mul(self, multiplier: f64) -> NutrientProfile {
        self.scale(multiplier)
    }
}
