//! Food lookup tools
//!
//! Validates the request, waits out the simulated API latency, resolves the
//! food and records the search in the history.

use std::sync::Mutex;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::history::HistoryStore;
use crate::models::{HistoryEntry, NutritionResult, Variant};
use crate::nutrition::{MatchSource, Resolver, DEFAULT_SERVING_GRAMS};

/// Rejected lookup input
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Please enter a food name")]
    EmptyFoodName,
}

/// A lookup as requested by the caller
#[derive(Debug, Clone)]
pub struct LookupRequest {
    pub food_name: String,
    pub serving_size: Option<f64>,
    pub variant: Variant,
}

/// Response for lookup_food
#[derive(Debug, Serialize)]
pub struct LookupResponse {
    #[serde(flatten)]
    pub result: NutritionResult,
    pub variant: Variant,
    pub match_source: MatchSource,
    /// Set when the history could not be saved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_warning: Option<String>,
    /// History after recording this search
    pub history: Vec<HistoryEntry>,
}

/// Trimmed food name, or an error if nothing is left
pub fn validate_food_name(raw: &str) -> Result<&str, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyFoodName);
    }
    Ok(name)
}

/// Resolve a food and remember the search
pub async fn lookup_food(
    resolver: &Resolver,
    history: &Mutex<HistoryStore>,
    latency: Duration,
    request: LookupRequest,
) -> Result<LookupResponse, String> {
    let food_name = validate_food_name(&request.food_name).map_err(|e| e.to_string())?;
    let serving_size = request.serving_size.unwrap_or(DEFAULT_SERVING_GRAMS);

    tracing::info!(
        "Looking up: {}, serving: {}g, variant: {}",
        food_name,
        serving_size,
        request.variant.as_str()
    );

    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }

    let found = resolver.find_profile(food_name, request.variant);
    tracing::debug!("Matched via {:?} (key: {:?})", found.source, found.key);
    let result = NutritionResult::from_profile(food_name, found.profile, serving_size);

    let entry = HistoryEntry::from_result(
        food_name,
        serving_size,
        request.variant,
        &result,
        chrono::Utc::now().timestamp_millis(),
    );

    let (history_warning, history) = {
        let mut history = history
            .lock()
            .map_err(|_| "History lock poisoned".to_string())?;
        let warning = history.add(entry).err().map(|e| {
            tracing::warn!("Lookup succeeded but history was not saved: {}", e);
            e.to_string()
        });
        (warning, history.list())
    };

    Ok(LookupResponse {
        result,
        variant: request.variant,
        match_source: found.source,
        history_warning,
        history,
    })
}

/// Repeat the lookup stored at a history position
pub async fn rerun_history_entry(
    resolver: &Resolver,
    history: &Mutex<HistoryStore>,
    latency: Duration,
    index: usize,
) -> Result<LookupResponse, String> {
    let request = {
        let history = history
            .lock()
            .map_err(|_| "History lock poisoned".to_string())?;
        let entry = history.get(index).ok_or_else(|| {
            format!(
                "History index {} out of range (history has {} entries)",
                index,
                history.len()
            )
        })?;
        LookupRequest {
            food_name: entry.food_name.clone(),
            serving_size: Some(entry.serving_size),
            variant: entry.variant,
        }
    };

    lookup_food(resolver, history, latency, request).await
}
