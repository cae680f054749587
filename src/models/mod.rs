//! Data models
//!
//! Nutrient baselines, lookup results and history entries.

mod history_entry;
mod nutrition;
mod nutrition_result;
mod variant;

pub use history_entry::HistoryEntry;
pub use nutrition::{NutrientProfile, DEFAULT_PROFILE};
pub use nutrition_result::{display_name, format_tenths, round_half_up, NutritionResult};
pub use variant::Variant;
