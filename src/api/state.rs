//! Application state for the HTTP read surface.

use std::sync::Arc;

use crate::analytics::DateIndex;
use crate::config::EngineConfig;
use crate::models::WorkerRecord;
use crate::session::collect_groups;

/// Shared application state.
///
/// The dataset is immutable for the lifetime of the state, so the calendar
/// and the group list are derived once here and shared across handlers.
#[derive(Clone)]
pub struct AppState {
    workers: Arc<Vec<WorkerRecord>>,
    index: Arc<DateIndex>,
    groups: Arc<Vec<String>>,
    config: Arc<EngineConfig>,
}

impl AppState {
    /// Creates the application state from a loaded dataset.
    pub fn new(workers: Vec<WorkerRecord>, config: EngineConfig) -> Self {
        let index = DateIndex::from_workers(&workers);
        let groups = collect_groups(&workers);
        Self {
            workers: Arc::new(workers),
            index: Arc::new(index),
            groups: Arc::new(groups),
            config: Arc::new(config),
        }
    }

    /// The raw records, as loaded.
    pub fn workers(&self) -> &[WorkerRecord] {
        &self.workers
    }

    /// The calendar of available harvest dates.
    pub fn index(&self) -> &DateIndex {
        &self.index
    }

    /// Distinct group labels, sorted.
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
