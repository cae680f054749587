//! Runtime configuration
//!
//! Everything is read from environment variables with project-relative defaults.

use std::path::PathBuf;
use std::time::Duration;

/// Default simulated lookup latency
pub const DEFAULT_LATENCY_MS: u64 = 1000;

/// Resolved application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite file backing the key-value store
    pub database_path: PathBuf,
    /// Directory containing `common-foods.json` and `synonyms.json`
    pub data_dir: PathBuf,
    /// Delay applied before each lookup result
    pub lookup_latency: Duration,
}

impl AppConfig {
    /// Build the configuration from `NUTRICALC_*` environment variables
    pub fn from_env() -> Self {
        let database_path = std::env::var("NUTRICALC_DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| project_root().join("data").join("nutricalc.db"));

        let data_dir = std::env::var("NUTRICALC_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| project_root().join("assets").join("data"));

        let lookup_latency = parse_latency(std::env::var("NUTRICALC_LATENCY_MS").ok().as_deref());

        Self {
            database_path,
            data_dir,
            lookup_latency,
        }
    }
}

/// Parse a latency override in milliseconds, falling back to the default
pub fn parse_latency(raw: Option<&str>) -> Duration {
    match raw.map(str::trim) {
        None | Some("") => Duration::from_millis(DEFAULT_LATENCY_MS),
        Some(s) => match s.parse::<u64>() {
            Ok(ms) => Duration::from_millis(ms),
            Err(_) => {
                tracing::warn!(
                    "Invalid NUTRICALC_LATENCY_MS '{}', using {}ms",
                    s,
                    DEFAULT_LATENCY_MS
                );
                Duration::from_millis(DEFAULT_LATENCY_MS)
            }
        },
    }
}

/// Directory the binary was built in, or the working directory
fn project_root() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    // Go up from target/release or target/debug to project root
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(parent) = path.parent() {
            if let Some(grandparent) = parent.parent() {
                path = grandparent.to_path_buf();
            }
        }
    }

    path
}
