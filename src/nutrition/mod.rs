//! Nutrition lookup module
//!
//! Name normalization, the food catalog and the resolution cascade.

pub mod catalog;
pub mod normalize;
pub mod resolver;

pub use catalog::{
    DataLoadError, DatasetState, FoodCatalog, FoodDataset, SynonymTable, FOODS_FILE,
    SYNONYMS_FILE,
};
pub use normalize::{normalize_name, variant_key};
pub use resolver::{MatchSource, ProfileMatch, Resolver, DEFAULT_SERVING_GRAMS};
