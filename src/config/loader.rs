//! Configuration loading functionality.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::EngineConfig;

/// Loads the engine configuration from a YAML file.
///
/// Callers that want to run without a configuration file should use
/// [`EngineConfig::default`] instead; a missing file here is an error.
///
/// # Example
///
/// ```no_run
/// use harvest_engine::config::load_config;
///
/// let config = load_config("./config/engine.yaml")?;
/// assert!(config.anomaly.max_count_per_day > 0);
/// # Ok::<(), harvest_engine::error::EngineError>(())
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> EngineResult<EngineConfig> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
        path: path_str.clone(),
    })?;

    serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParse {
        path: path_str,
        message: e.to_string(),
    })
}
