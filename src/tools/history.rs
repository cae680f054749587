//! Search history tools
//!
//! List, remove and clear remembered lookups.

use std::sync::Mutex;

use serde::Serialize;

use crate::history::{format_entry_date, HistoryError, HistoryStats, HistoryStore};
use crate::models::HistoryEntry;

/// One history card
#[derive(Debug, Serialize)]
pub struct HistoryItem {
    pub index: usize,
    #[serde(flatten)]
    pub entry: HistoryEntry,
    pub date_label: String,
}

/// Response for list_history
#[derive(Debug, Serialize)]
pub struct ListHistoryResponse {
    pub items: Vec<HistoryItem>,
    pub total: usize,
}

/// Response for remove_history_entry
#[derive(Debug, Serialize)]
pub struct RemoveHistoryEntryResponse {
    pub success: bool,
    pub removed: HistoryEntry,
    pub remaining: usize,
    pub history: Vec<HistoryEntry>,
}

/// Response for clear_history
#[derive(Debug, Serialize)]
pub struct ClearHistoryResponse {
    pub success: bool,
    pub history: Vec<HistoryEntry>,
}

fn lock(history: &Mutex<HistoryStore>) -> Result<std::sync::MutexGuard<'_, HistoryStore>, String> {
    history
        .lock()
        .map_err(|_| "History lock poisoned".to_string())
}

/// History entries, most recent first
pub fn list_history(history: &Mutex<HistoryStore>, now_ms: i64) -> Result<ListHistoryResponse, String> {
    let entries = lock(history)?.list();

    let items: Vec<HistoryItem> = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| HistoryItem {
            index,
            date_label: format_entry_date(entry.timestamp, now_ms),
            entry,
        })
        .collect();
    let total = items.len();

    Ok(ListHistoryResponse { items, total })
}

/// Delete one entry by position
pub fn remove_history_entry(
    history: &Mutex<HistoryStore>,
    index: usize,
) -> Result<RemoveHistoryEntryResponse, String> {
    let mut history = lock(history)?;
    let removed = history.remove(index).map_err(|e| match e {
        HistoryError::Persistence(_) => {
            format!("History entry removed in memory but not saved: {}", e)
        }
        other => format!("Failed to remove history entry: {}", other),
    })?;

    Ok(RemoveHistoryEntryResponse {
        success: true,
        removed,
        remaining: history.len(),
        history: history.list(),
    })
}

/// Forget every entry
pub fn clear_history(history: &Mutex<HistoryStore>) -> Result<ClearHistoryResponse, String> {
    let mut history = lock(history)?;
    history
        .clear()
        .map_err(|e| format!("History cleared in memory but not saved: {}", e))?;
    Ok(ClearHistoryResponse {
        success: true,
        history: history.list(),
    })
}

/// Totals across the history
pub fn history_stats(history: &Mutex<HistoryStore>) -> Result<HistoryStats, String> {
    Ok(lock(history)?.stats())
}
