//! Engine configuration.
//!
//! The anomaly heuristics are hand-tuned domain policy, not algorithmic
//! requirements, so they live in configuration with sensible defaults rather
//! than as hard-coded invariants.

mod loader;
mod types;

pub use loader::load_config;
pub use types::{AnomalyConfig, EngineConfig};
