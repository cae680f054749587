//! Search history module
//!
//! Bounded history of lookups persisted to a key-value slot.

pub mod kv;
pub mod store;

pub use kv::{KeyValueStore, KvError, MemoryKvStore, SqliteKvStore};
pub use store::{
    format_entry_date, format_simple_date, HistoryError, HistoryResult, HistoryStats,
    HistoryStore, DEDUP_WINDOW_MS, HISTORY_KEY, MAX_ENTRIES,
};
