//! Food-name resolution
//!
//! Maps a free-text food name to a per-100g profile through a fixed cascade
//! and scales it to the requested serving.

use std::sync::OnceLock;

use serde::Serialize;

use crate::models::{NutrientProfile, NutritionResult, Variant, DEFAULT_PROFILE};

use super::catalog::{DatasetState, FoodCatalog, FoodDataset};
use super::normalize::{normalize_name, variant_key};

/// Serving size used when the caller gives none
pub const DEFAULT_SERVING_GRAMS: f64 = 100.0;

/// Which cascade step produced a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    Exact,
    Variant,
    Synonym,
    Partial,
    Default,
}

/// Profile chosen for a name, with the key that matched
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileMatch<'a> {
    pub profile: &'a NutrientProfile,
    pub source: MatchSource,
    /// Dataset key, absent for the default profile
    pub key: Option<&'a str>,
}

impl<'a> ProfileMatch<'a> {
    fn default_profile() -> Self {
        Self {
            profile: &DEFAULT_PROFILE,
            source: MatchSource::Default,
            key: None,
        }
    }
}

/// Resolves food names against a catalog installed once at startup
///
/// Until [`Resolver::install`] runs, every lookup returns the default profile.
#[derive(Debug, Default)]
pub struct Resolver {
    catalog: OnceLock<FoodCatalog>,
}

impl Resolver {
    /// Resolver with no catalog yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver with a catalog already in place
    pub fn with_catalog(catalog: FoodCatalog) -> Self {
        let resolver = Self::new();
        resolver.install(catalog);
        resolver
    }

    /// Install the loaded catalog; returns false if one was already installed
    pub fn install(&self, catalog: FoodCatalog) -> bool {
        self.catalog.set(catalog).is_ok()
    }

    pub fn state(&self) -> DatasetState {
        match self.catalog.get() {
            Some(catalog) => catalog.state(),
            None => DatasetState::Unloaded,
        }
    }

    pub fn catalog(&self) -> Option<&FoodCatalog> {
        self.catalog.get()
    }

    /// Nutrition facts for `serving_grams` of `food_name`
    ///
    /// Never fails: unmatched names get the default profile. Serving sizes are
    /// not validated, so zero or negative sizes scale linearly.
    pub fn resolve(&self, food_name: &str, serving_grams: f64, variant: Variant) -> NutritionResult {
        let found = self.find_profile(food_name, variant);
        tracing::debug!(
            "Resolved '{}' via {:?} (key: {:?})",
            food_name,
            found.source,
            found.key
        );
        NutritionResult::from_profile(food_name, found.profile, serving_grams)
    }

    /// Per-100g profile for a food name, first cascade match wins
    pub fn find_profile(&self, food_name: &str, variant: Variant) -> ProfileMatch<'_> {
        let Some(catalog) = self.catalog.get() else {
            return ProfileMatch::default_profile();
        };
        let Some(dataset) = catalog.dataset() else {
            return ProfileMatch::default_profile();
        };

        let name = normalize_name(food_name);

        if let Some(found) = exact(dataset, &name) {
            return found;
        }

        if variant.is_specific() {
            if let Some(found) = variant_probe(dataset, &name, MatchSource::Variant) {
                return found;
            }
        }

        if let Some(canonical) = catalog.synonyms().canonical_for(&name) {
            let canonical = normalize_name(canonical);
            if let Some(found) = exact(dataset, &canonical)
                .map(|m| ProfileMatch { source: MatchSource::Synonym, ..m })
                .or_else(|| variant_probe(dataset, &canonical, MatchSource::Synonym))
            {
                return found;
            }
        }

        if let Some(found) = partial(dataset, &name) {
            return found;
        }

        ProfileMatch::default_profile()
    }
}

fn exact<'a>(dataset: &'a FoodDataset, name: &str) -> Option<ProfileMatch<'a>> {
    dataset.get_entry(name).map(|(key, profile)| ProfileMatch {
        profile,
        source: MatchSource::Exact,
        key: Some(key),
    })
}

/// Probe `(cooked)` then `(raw)`, whichever variant was asked for
fn variant_probe<'a>(
    dataset: &'a FoodDataset,
    name: &str,
    source: MatchSource,
) -> Option<ProfileMatch<'a>> {
    [Variant::Cooked, Variant::Raw].iter().find_map(|v| {
        dataset.get_entry(&variant_key(name, v.as_str())).map(|(key, profile)| ProfileMatch {
            profile,
            source,
            key: Some(key),
        })
    })
}

/// First key, in load order, contained in the query or containing it
fn partial<'a>(dataset: &'a FoodDataset, name: &str) -> Option<ProfileMatch<'a>> {
    dataset
        .iter()
        .find(|(key, _)| name.contains(key) || key.contains(name))
        .map(|(key, profile)| ProfileMatch {
            profile,
            source: MatchSource::Partial,
            key: Some(key),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::catalog::SynonymTable;

    fn banana() -> NutrientProfile {
        NutrientProfile {
            calories: 89.0,
            total_fat: 0.3,
            saturated_fat: 0.1,
            cholesterol: 0.0,
            sodium: 1.0,
            carbohydrates: 22.8,
            fiber: 2.6,
            sugars: 12.2,
            protein: 1.1,
        }
    }

    fn kcal(calories: f64) -> NutrientProfile {
        NutrientProfile {
            calories,
            ..Default::default()
        }
    }

    fn resolver(foods: Vec<(&str, NutrientProfile)>, synonyms: Vec<(&str, &str)>) -> Resolver {
        Resolver::with_catalog(FoodCatalog::new(
            Some(FoodDataset::from_entries(foods)),
            SynonymTable::from_entries(synonyms),
        ))
    }

    #[test]
    fn test_banana_example() {
        let r = resolver(vec![("banana", banana())], vec![]);
        let result = r.resolve("banana", 150.0, Variant::Auto);
        assert_eq!(result.food_name, "Banana");
        assert_eq!(result.nf_calories, 134);
        assert_eq!(result.nf_protein, "1.7");
        assert_eq!(result.nf_total_carbohydrate, "34.2");
        assert_eq!(result.nf_sodium, 2);
        assert_eq!(result.serving_weight_grams, 150);
    }

    #[test]
    fn test_unloaded_resolver_uses_default() {
        let r = Resolver::new();
        assert_eq!(r.state(), DatasetState::Unloaded);
        let result = r.resolve("xyzunknown", DEFAULT_SERVING_GRAMS, Variant::Auto);
        assert_eq!(result.nf_calories, 100);
        assert_eq!(result.nf_protein, "5.0");
        assert_eq!(result.food_name, "Xyzunknown");
    }

    #[test]
    fn test_unavailable_dataset_behaves_like_miss() {
        let r = Resolver::with_catalog(FoodCatalog::unavailable());
        assert_eq!(r.state(), DatasetState::Unavailable);
        let found = r.find_profile("banana", Variant::Cooked);
        assert_eq!(found.source, MatchSource::Default);
    }

    #[test]
    fn test_install_only_once() {
        let r = Resolver::new();
        assert!(r.install(FoodCatalog::unavailable()));
        assert!(!r.install(FoodCatalog::unavailable()));
    }

    #[test]
    fn test_exact_match_after_normalization() {
        let r = resolver(vec![("platano", kcal(89.0))], vec![]);
        let found = r.find_profile("  PLÁTANO ", Variant::Auto);
        assert_eq!(found.source, MatchSource::Exact);
        assert_eq!(found.key, Some("platano"));
    }

    #[test]
    fn test_exact_beats_variant() {
        let r = resolver(vec![("rice (cooked)", kcal(130.0)), ("rice", kcal(360.0))], vec![]);
        let found = r.find_profile("rice", Variant::Cooked);
        assert_eq!(found.source, MatchSource::Exact);
        assert_eq!(found.profile.calories, 360.0);
    }

    #[test]
    fn test_variant_probe_prefers_cooked_even_for_raw() {
        let r = resolver(vec![("rice (raw)", kcal(360.0)), ("rice (cooked)", kcal(130.0))], vec![]);
        let found = r.find_profile("rice", Variant::Raw);
        assert_eq!(found.source, MatchSource::Variant);
        assert_eq!(found.key, Some("rice (cooked)"));

        let only_raw = resolver(vec![("lentils (raw)", kcal(352.0))], vec![]);
        let found = only_raw.find_profile("lentils", Variant::Raw);
        assert_eq!(found.key, Some("lentils (raw)"));
    }

    #[test]
    fn test_auto_skips_variant_probe() {
        let r = resolver(vec![("rice (raw)", kcal(360.0)), ("pasta (cooked)", kcal(131.0))], vec![]);
        // "rice" is a substring of "rice (raw)", so auto still lands there, but via partial
        let found = r.find_profile("rice", Variant::Auto);
        assert_eq!(found.source, MatchSource::Partial);
    }

    #[test]
    fn test_synonym_redirect() {
        let r = resolver(vec![("banana", banana())], vec![("Guineo", "Banana")]);
        let found = r.find_profile("guineo", Variant::Auto);
        assert_eq!(found.source, MatchSource::Synonym);
        assert_eq!(found.key, Some("banana"));
    }

    #[test]
    fn test_synonym_reaches_variant_keys() {
        let r = resolver(vec![("chickpeas (cooked)", kcal(164.0))], vec![("garbanzos", "chickpeas")]);
        let found = r.find_profile("Garbanzos", Variant::Auto);
        assert_eq!(found.source, MatchSource::Synonym);
        assert_eq!(found.key, Some("chickpeas (cooked)"));
    }

    #[test]
    fn test_dangling_synonym_falls_through_to_partial() {
        let r = resolver(vec![("apple", kcal(52.0))], vec![("green apple", "granny smith")]);
        let found = r.find_profile("green apple", Variant::Auto);
        assert_eq!(found.source, MatchSource::Partial);
        assert_eq!(found.key, Some("apple"));
    }

    #[test]
    fn test_partial_match_both_directions_in_load_order() {
        let r = resolver(
            vec![("chicken breast", kcal(165.0)), ("chicken", kcal(239.0))],
            vec![],
        );
        // query contained in a key: first key in load order wins
        assert_eq!(r.find_profile("chick", Variant::Auto).key, Some("chicken breast"));
        // key contained in the query
        assert_eq!(
            r.find_profile("grilled chicken thigh", Variant::Auto).key,
            Some("chicken")
        );
    }

    #[test]
    fn test_partial_order_depends_on_load_order() {
        let r = resolver(
            vec![("chicken", kcal(239.0)), ("chicken breast", kcal(165.0))],
            vec![],
        );
        assert_eq!(r.find_profile("chick", Variant::Auto).key, Some("chicken"));
    }

    #[test]
    fn test_default_fallback_is_scaled() {
        let r = resolver(vec![("banana", banana())], vec![]);
        let result = r.resolve("quinoa", 250.0, Variant::Auto);
        assert_eq!(result.nf_calories, 250);
        assert_eq!(result.nf_protein, "12.5");
        assert_eq!(result.nf_total_fat, "7.5");
        assert_eq!(result.nf_cholesterol, 50);
        assert_eq!(result.nf_sodium, 125);
        assert_eq!(result.nf_total_carbohydrate, "37.5");
        assert_eq!(result.nf_dietary_fiber, "3.8");
        assert_eq!(result.nf_sugars, "12.5");
    }

    #[test]
    fn test_scaling_is_linear() {
        let r = resolver(vec![("banana", banana())], vec![]);
        let base = r.find_profile("banana", Variant::Auto).profile.calories;
        for serving in [1.0, 33.0, 100.0, 150.0, 275.5, 1000.0] {
            let result = r.resolve("banana", serving, Variant::Auto);
            assert_eq!(
                result.nf_calories,
                crate::models::round_half_up(base * (serving / 100.0)),
                "serving {}",
                serving
            );
        }
    }

    #[test]
    fn test_display_name_uses_raw_input() {
        let r = resolver(vec![("platano", kcal(89.0))], vec![]);
        let result = r.resolve("plátano maduro", 100.0, Variant::Auto);
        assert_eq!(result.food_name, "Plátano maduro");
    }

    #[tokio::test]
    async fn test_shipped_food_data() {
        let data_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/data");
        let r = Resolver::with_catalog(FoodCatalog::load(&data_dir).await);
        assert_eq!(r.state(), DatasetState::Loaded);

        let found = r.find_profile("Arroz integral", Variant::Auto);
        assert_eq!(found.source, MatchSource::Synonym);
        assert_eq!(found.key, Some("brown rice (cooked)"));

        let found = r.find_profile("Brócoli", Variant::Raw);
        assert_eq!(found.key, Some("broccoli (cooked)"));

        let found = r.find_profile("potato", Variant::Raw);
        assert_eq!(found.source, MatchSource::Variant);
        assert_eq!(found.key, Some("potato (cooked)"));
    }
}
