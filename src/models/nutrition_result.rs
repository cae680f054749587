//! Scaled nutrition facts for one serving
//!
//! Field names follow the Nutritionix response shape so callers can swap in a
//! real API later without touching rendering code.

use serde::{Deserialize, Serialize};

use super::NutrientProfile;

/// Nutrition facts for a single resolved serving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionResult {
    pub food_name: String,
    pub serving_qty: u32,
    pub serving_unit: String,
    pub serving_weight_grams: i64,
    pub nf_calories: i64,
    pub nf_total_fat: String,
    pub nf_saturated_fat: String,
    pub nf_cholesterol: i64,
    pub nf_sodium: i64,
    pub nf_total_carbohydrate: String,
    pub nf_dietary_fiber: String,
    pub nf_sugars: String,
    pub nf_protein: String,
}

impl NutritionResult {
    /// Build the result for `serving_grams` of a per-100g profile
    pub fn from_profile(food_name: &str, profile: &NutrientProfile, serving_grams: f64) -> Self {
        let scaled = profile.for_serving(serving_grams);

        Self {
            food_name: display_name(food_name),
            serving_qty: 1,
            serving_unit: "g".to_string(),
            serving_weight_grams: serving_grams.trunc() as i64,
            nf_calories: round_half_up(scaled.calories),
            nf_total_fat: format_tenths(scaled.total_fat),
            nf_saturated_fat: format_tenths(scaled.saturated_fat),
            nf_cholesterol: round_half_up(scaled.cholesterol),
            nf_sodium: round_half_up(scaled.sodium),
            nf_total_carbohydrate: format_tenths(scaled.carbohydrates),
            nf_dietary_fiber: format_tenths(scaled.fiber),
            nf_sugars: format_tenths(scaled.sugars),
            nf_protein: format_tenths(scaled.protein),
        }
    }
}

/// Input name with its first character uppercased
pub fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Round to the nearest integer, ties toward positive infinity
pub fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor as i64 + 1
    } else {
        floor as i64
    }
}

/// Fixed one-decimal rendering; exact ties round away from zero
///
/// Non-ties go through `{:.1}`, which rounds on the exact binary value. A
/// binary double sits exactly halfway between two tenths only when it is an
/// odd multiple of 0.25, so those are the only values rounded by hand.
pub fn format_tenths(value: f64) -> String {
    let quarters = value * 4.0;
    let value = if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        (value * 10.0).round() / 10.0
    } else {
        value
    };
    // Adding zero folds -0.0 into 0.0
    format!("{:.1}", value + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_PROFILE;

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("banana"), "Banana");
        assert_eq!(display_name("ñame"), "Ñame");
        assert_eq!(display_name("Apple pie"), "Apple pie");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(133.5), 134);
        assert_eq!(round_half_up(133.49), 133);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
        assert_eq!(round_half_up(0.0), 0);
    }

    #[test]
    fn test_format_tenths() {
        assert_eq!(format_tenths(1.1 * 1.5), "1.7");
        assert_eq!(format_tenths(0.25), "0.3");
        assert_eq!(format_tenths(5.0), "5.0");
        assert_eq!(format_tenths(22.8 * 1.5), "34.2");
        assert_eq!(format_tenths(-0.0), "0.0");
    }

    #[test]
    fn test_format_tenths_exact_ties() {
        assert_eq!(format_tenths(0.75), "0.8");
        assert_eq!(format_tenths(1.25), "1.3");
        assert_eq!(format_tenths(-0.25), "-0.3");
        assert_eq!(format_tenths(2.5), "2.5");
    }

    #[test]
    fn test_format_tenths_near_ties_follow_binary_value() {
        // Products that print as x.x5 but are stored just below it
        assert_eq!(format_tenths(1.5 * (170.0 / 100.0)), "2.5");
        assert_eq!(format_tenths(0.3 * (50.0 / 100.0)), "0.1");
        assert_eq!(format_tenths(12.2 * (25.0 / 100.0)), "3.0");
        assert_eq!(format_tenths(2.6 * (175.0 / 100.0)), "4.5");
    }

    #[test]
    fn test_default_fiber_at_170_grams() {
        let result = NutritionResult::from_profile("x", &DEFAULT_PROFILE, 170.0);
        assert_eq!(result.nf_dietary_fiber, "2.5");
    }

    #[test]
    fn test_default_profile_unscaled() {
        let result = NutritionResult::from_profile("xyzunknown", &DEFAULT_PROFILE, 100.0);
        assert_eq!(result.food_name, "Xyzunknown");
        assert_eq!(result.nf_calories, 100);
        assert_eq!(result.nf_protein, "5.0");
        assert_eq!(result.nf_total_fat, "3.0");
        assert_eq!(result.nf_cholesterol, 20);
        assert_eq!(result.nf_sodium, 50);
        assert_eq!(result.nf_dietary_fiber, "1.5");
        assert_eq!(result.serving_weight_grams, 100);
        assert_eq!(result.serving_unit, "g");
        assert_eq!(result.serving_qty, 1);
    }

    #[test]
    fn test_negative_serving_passes_through() {
        let result = NutritionResult::from_profile("x", &DEFAULT_PROFILE, -100.0);
        assert_eq!(result.nf_calories, -100);
        assert_eq!(result.nf_protein, "-5.0");
        assert_eq!(result.serving_weight_grams, -100);
    }

    #[test]
    fn test_fractional_serving_weight_truncates() {
        let result = NutritionResult::from_profile("x", &DEFAULT_PROFILE, 150.9);
        assert_eq!(result.serving_weight_grams, 150);
    }
}
