//! Search history store
//!
//! Keeps the most recent lookups, newest first, and writes the whole list to
//! a key-value slot after every change. The in-memory list is authoritative:
//! a failed write is reported but never rolls a change back.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::models::HistoryEntry;

use super::kv::{KeyValueStore, KvError};

/// Slot holding the serialized history
pub const HISTORY_KEY: &str = "nutritionHistory";
/// Maximum number of remembered searches
pub const MAX_ENTRIES: usize = 20;
/// Repeats of a search inside this window refresh the existing entry
pub const DEDUP_WINDOW_MS: i64 = 300_000;

/// History error types
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("History index {index} out of range (history has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Failed to save history: {0}")]
    Persistence(#[from] KvError),

    #[error("Failed to encode history: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type for history operations
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Summary of the current history
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    pub total_searches: usize,
    pub unique_foods: usize,
    pub last_search: String,
}

/// Bounded, deduplicated list of past lookups
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
    store: Arc<dyn KeyValueStore>,
}

impl HistoryStore {
    /// Load the saved history; unreadable or corrupt data starts empty
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let entries = match store.get(HISTORY_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Option<Vec<HistoryEntry>>>(&json) {
                Ok(entries) => entries.unwrap_or_default(),
                Err(e) => {
                    tracing::warn!("Discarding corrupt history: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Could not read history: {}", e);
                Vec::new()
            }
        };

        tracing::info!("History loaded: {} entries", entries.len());
        Self { entries, store }
    }

    /// Copy of the entries, most recent first
    pub fn list(&self) -> Vec<HistoryEntry> {
        self.entries.clone()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a search at the current wall-clock time
    pub fn add(&mut self, entry: HistoryEntry) -> HistoryResult<()> {
        self.add_at(entry, Utc::now().timestamp_millis())
    }

    /// Record a search at `now_ms`
    ///
    /// A matching search (same food ignoring case, same serving) newer than
    /// [`DEDUP_WINDOW_MS`] is moved to the front with its timestamp refreshed;
    /// anything else is inserted at the front and the list is capped at
    /// [`MAX_ENTRIES`].
    pub fn add_at(&mut self, entry: HistoryEntry, now_ms: i64) -> HistoryResult<()> {
        let recent = self
            .entries
            .iter()
            .position(|e| e.same_search(&entry) && now_ms.saturating_sub(e.timestamp) < DEDUP_WINDOW_MS);

        match recent {
            Some(index) => {
                let mut existing = self.entries.remove(index);
                existing.timestamp = now_ms;
                self.entries.insert(0, existing);
            }
            None => {
                self.entries.insert(0, entry);
                self.entries.truncate(MAX_ENTRIES);
            }
        }

        self.persist()
    }

    /// Delete the entry at `index`
    pub fn remove(&mut self, index: usize) -> HistoryResult<HistoryEntry> {
        if index >= self.entries.len() {
            return Err(HistoryError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }

        let removed = self.entries.remove(index);
        self.persist()?;
        Ok(removed)
    }

    /// Forget every entry
    pub fn clear(&mut self) -> HistoryResult<()> {
        self.entries.clear();
        self.persist()
    }

    /// Totals for the history panel
    pub fn stats(&self) -> HistoryStats {
        let unique_foods = self
            .entries
            .iter()
            .map(|e| e.food_name.to_lowercase())
            .collect::<HashSet<_>>()
            .len();

        let last_search = self
            .entries
            .first()
            .map(|e| format_simple_date(e.timestamp))
            .unwrap_or_else(|| "never".to_string());

        HistoryStats {
            total_searches: self.entries.len(),
            unique_foods,
            last_search,
        }
    }

    fn persist(&self) -> HistoryResult<()> {
        let json = serde_json::to_string(&self.entries)?;
        if let Err(e) = self.store.set(HISTORY_KEY, &json) {
            tracing::error!("Error saving history: {}", e);
            return Err(e.into());
        }
        Ok(())
    }
}

/// Local calendar date of a timestamp, `dd/mm/yyyy`
pub fn format_simple_date(timestamp_ms: i64) -> String {
    match DateTime::from_timestamp_millis(timestamp_ms) {
        Some(utc) => utc.with_timezone(&Local).format("%d/%m/%Y").to_string(),
        None => "invalid date".to_string(),
    }
}

/// Label for a history card: `Today 14:05`, `Yesterday 09:30`, or a full date
pub fn format_entry_date(timestamp_ms: i64, now_ms: i64) -> String {
    let Some(when) = DateTime::from_timestamp_millis(timestamp_ms) else {
        return "date unavailable".to_string();
    };
    let when = when.with_timezone(&Local);

    let diff_days = now_ms.saturating_sub(timestamp_ms).saturating_abs() / (1000 * 60 * 60 * 24);
    match diff_days {
        0 => format!("Today {}", when.format("%H:%M")),
        1 => format!("Yesterday {}", when.format("%H:%M")),
        _ => when.format("%d/%m/%y %H:%M").to_string(),
    }
}
