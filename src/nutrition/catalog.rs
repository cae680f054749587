//! Food dataset and synonym table
//!
//! Both sources are JSON objects read once at startup. Loading is best-effort:
//! a missing or malformed file leaves that source empty and the resolver falls
//! back to the default profile.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

use crate::models::NutrientProfile;

use super::normalize::normalize_name;

/// File name of the food dataset inside the data directory
pub const FOODS_FILE: &str = "common-foods.json";
/// File name of the synonym table inside the data directory
pub const SYNONYMS_FILE: &str = "synonyms.json";

/// Failure to read or parse a data source
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Normalized food name -> per-100g profile, in file order
///
/// Order matters: partial matching returns the first key in load order.
#[derive(Debug, Clone, Default)]
pub struct FoodDataset {
    foods: IndexMap<String, NutrientProfile>,
}

impl FoodDataset {
    /// Build from raw names, normalizing every key
    ///
    /// Names that normalize to the same key keep the first position and the
    /// last profile.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, NutrientProfile)>,
        S: AsRef<str>,
    {
        let mut foods = IndexMap::new();
        for (name, profile) in entries {
            foods.insert(normalize_name(name.as_ref()), profile);
        }
        Self { foods }
    }

    /// Parse a JSON object of name -> profile
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let raw: IndexMap<String, NutrientProfile> = serde_json::from_str(json)?;
        Ok(Self::from_entries(raw))
    }

    /// Stored key and profile for an exact key
    pub fn get_entry(&self, key: &str) -> Option<(&str, &NutrientProfile)> {
        self.foods.get_key_value(key).map(|(k, v)| (k.as_str(), v))
    }

    /// Entries in load order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NutrientProfile)> {
        self.foods.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}

/// Normalized alias -> canonical food name
#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    aliases: HashMap<String, String>,
}

impl SynonymTable {
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let aliases = entries
            .into_iter()
            .map(|(alias, canonical)| (normalize_name(alias.as_ref()), canonical.into()))
            .collect();
        Self { aliases }
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let raw: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(Self::from_entries(raw))
    }

    /// Canonical name for a normalized alias, as written in the source file
    pub fn canonical_for(&self, normalized_alias: &str) -> Option<&str> {
        self.aliases.get(normalized_alias).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

/// Lifecycle of the food dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetState {
    /// Startup load has not finished
    Unloaded,
    Loaded,
    /// Load failed; every lookup misses
    Unavailable,
}

/// Everything the resolver reads, fixed after load
#[derive(Debug, Clone, Default)]
pub struct FoodCatalog {
    dataset: Option<FoodDataset>,
    synonyms: SynonymTable,
}

impl FoodCatalog {
    pub fn new(dataset: Option<FoodDataset>, synonyms: SynonymTable) -> Self {
        Self { dataset, synonyms }
    }

    /// Catalog with no dataset at all
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Load both sources from a data directory, logging and skipping failures
    pub async fn load(data_dir: &Path) -> Self {
        let dataset = match read_json(&data_dir.join(FOODS_FILE), FoodDataset::from_json_str).await {
            Ok(dataset) => {
                tracing::info!("Food dataset loaded: {} items", dataset.len());
                Some(dataset)
            }
            Err(e) => {
                tracing::warn!("Food dataset unavailable, using default profile: {}", e);
                None
            }
        };

        let synonyms = match read_json(&data_dir.join(SYNONYMS_FILE), SynonymTable::from_json_str).await {
            Ok(synonyms) => {
                tracing::info!("Synonyms loaded: {}", synonyms.len());
                synonyms
            }
            Err(e) => {
                tracing::warn!("Synonyms unavailable: {}", e);
                SynonymTable::default()
            }
        };

        Self { dataset, synonyms }
    }

    pub fn state(&self) -> DatasetState {
        match self.dataset {
            Some(_) => DatasetState::Loaded,
            None => DatasetState::Unavailable,
        }
    }

    pub fn dataset(&self) -> Option<&FoodDataset> {
        self.dataset.as_ref()
    }

    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }
}

async fn read_json<T>(
    path: &Path,
    parse: fn(&str) -> Result<T, serde_json::Error>,
) -> Result<T, DataLoadError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DataLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    parse(&text).map_err(|source| DataLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
