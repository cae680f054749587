//! Search history entry
//!
//! Stored as camelCase JSON so histories written by the browser build of the
//! calculator load unchanged. That build wrote some numbers as strings
//! (serving sizes from form inputs, nutrient values from the result), so every
//! numeric field accepts either form.

use serde::{Deserialize, Deserializer, Serialize};

use super::{NutritionResult, Variant};

/// One remembered lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub food_name: String,
    #[serde(deserialize_with = "number_or_string")]
    pub serving_size: f64,
    #[serde(default)]
    pub variant: Variant,
    #[serde(default, deserialize_with = "integer_or_string")]
    pub calories: i64,
    #[serde(default, deserialize_with = "number_or_string")]
    pub protein: f64,
    #[serde(default, deserialize_with = "number_or_string")]
    pub carbs: f64,
    #[serde(default, deserialize_with = "number_or_string")]
    pub fat: f64,
    /// Milliseconds since the Unix epoch
    #[serde(deserialize_with = "integer_or_string")]
    pub timestamp: i64,
}

impl HistoryEntry {
    /// Entry for a lookup the caller just displayed
    pub fn from_result(
        food_name: &str,
        serving_size: f64,
        variant: Variant,
        result: &NutritionResult,
        timestamp: i64,
    ) -> Self {
        Self {
            food_name: food_name.to_string(),
            serving_size,
            variant,
            calories: result.nf_calories,
            protein: result.nf_protein.parse().unwrap_or(0.0),
            carbs: result.nf_total_carbohydrate.parse().unwrap_or(0.0),
            fat: result.nf_total_fat.parse().unwrap_or(0.0),
            timestamp,
        }
    }

    /// Same food (ignoring case) and same serving size
    pub fn same_search(&self, other: &HistoryEntry) -> bool {
        self.serving_size == other.serving_size
            && self.food_name.to_lowercase() == other.food_name.to_lowercase()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
    Null(()),
}

fn number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("expected a number, got '{}'", s))),
        NumberOrString::Null(()) => Ok(0.0),
    }
}

fn integer_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    number_or_string(deserializer).map(|n| n.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, serving: f64) -> HistoryEntry {
        HistoryEntry {
            food_name: name.to_string(),
            serving_size: serving,
            variant: Variant::Auto,
            calories: 0,
            protein: 0.0,
            carbs: 0.0,
            fat: 0.0,
            timestamp: 0,
        }
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let json = serde_json::to_value(entry("Banana", 150.0)).unwrap();
        assert_eq!(json["foodName"], "Banana");
        assert_eq!(json["servingSize"], 150.0);
        assert_eq!(json["variant"], "auto");
        assert!(json.get("food_name").is_none());
    }

    #[test]
    fn test_accepts_stringly_numbers() {
        let json = r#"{
            "foodName": "arroz",
            "servingSize": "150",
            "variant": "cooked",
            "calories": 195,
            "protein": "4.1",
            "carbs": "42.3",
            "fat": "0.4",
            "timestamp": 1700000000000
        }"#;
        let parsed: HistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.serving_size, 150.0);
        assert_eq!(parsed.variant, Variant::Cooked);
        assert_eq!(parsed.protein, 4.1);
        assert_eq!(parsed.timestamp, 1_700_000_000_000);
    }

    #[test]
    fn test_missing_nutrients_default_to_zero() {
        let json = r#"{"foodName": "pan", "servingSize": 100, "timestamp": 5}"#;
        let parsed: HistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.calories, 0);
        assert_eq!(parsed.variant, Variant::Auto);
    }

    #[test]
    fn test_rejects_garbage_number() {
        let json = r#"{"foodName": "pan", "servingSize": "lots", "timestamp": 5}"#;
        assert!(serde_json::from_str::<HistoryEntry>(json).is_err());
    }

    #[test]
    fn test_same_search_ignores_case_only() {
        assert!(entry("Banana", 100.0).same_search(&entry("bANANA", 100.0)));
        assert!(!entry("Banana", 100.0).same_search(&entry("Banana", 150.0)));
        assert!(!entry("Banana", 100.0).same_search(&entry("Bananas", 100.0)));
    }

    #[test]
    fn test_from_result_copies_headline_nutrients() {
        let result = NutritionResult::from_profile("banana", &crate::models::DEFAULT_PROFILE, 200.0);
        let e = HistoryEntry::from_result("banana", 200.0, Variant::Raw, &result, 42);
        assert_eq!(e.calories, 200);
        assert_eq!(e.protein, 10.0);
        assert_eq!(e.carbs, 30.0);
        assert_eq!(e.fat, 6.0);
        assert_eq!(e.timestamp, 42);
        assert_eq!(e.variant, Variant::Raw);
    }
}
