//! NutriCalc Status Tool
//!
//! Provides runtime status information about the NutriCalc service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::nutrition::{DatasetState, Resolver};

/// Runtime status of the NutriCalc service
#[derive(Debug, Clone, Serialize)]
pub struct NutriCalcStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Food catalog
    pub dataset_state: DatasetState,
    pub food_count: usize,
    pub synonym_count: usize,

    /// History storage
    pub history_entries: usize,
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    /// Get the current status
    pub fn get_status(&self, resolver: &Resolver, history_entries: usize) -> NutriCalcStatus {
        let build_info = BuildInfo::current();

        let (food_count, synonym_count) = resolver
            .catalog()
            .map(|c| (c.dataset().map_or(0, |d| d.len()), c.synonyms().len()))
            .unwrap_or((0, 0));

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        NutriCalcStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            dataset_state: resolver.state(),
            food_count,
            synonym_count,
            history_entries,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::{FoodCatalog, FoodDataset, SynonymTable};
    use crate::models::NutrientProfile;

    #[test]
    fn test_status_before_catalog_load() {
        let tracker = StatusTracker::new(PathBuf::from("/nonexistent/nutricalc.db"));
        let status = tracker.get_status(&Resolver::new(), 0);
        assert_eq!(status.dataset_state, DatasetState::Unloaded);
        assert_eq!(status.food_count, 0);
        assert_eq!(status.database_size_bytes, None);
        assert_eq!(status.process_id, std::process::id());
    }

    #[test]
    fn test_status_counts_catalog() {
        let resolver = Resolver::with_catalog(FoodCatalog::new(
            Some(FoodDataset::from_entries(vec![
                ("apple", NutrientProfile::default()),
                ("pear", NutrientProfile::default()),
            ])),
            SynonymTable::from_entries(vec![("manzana", "apple")]),
        ));
        let status = StatusTracker::new(PathBuf::from("x.db")).get_status(&resolver, 3);
        assert_eq!(status.dataset_state, DatasetState::Loaded);
        assert_eq!(status.food_count, 2);
        assert_eq!(status.synonym_count, 1);
        assert_eq!(status.history_entries, 3);

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["dataset_state"], "loaded");
    }
}
