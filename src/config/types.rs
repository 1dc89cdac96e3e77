//! Configuration types for the harvest analytics engine.

use serde::{Deserialize, Serialize};

/// Tuning knobs for the anomaly detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomalyConfig {
    /// The percentile of the in-range quantity pool used as the base of the
    /// dynamic high-value threshold.
    pub percentile: f64,
    /// Multiplier applied to the percentile value to obtain the threshold.
    pub high_multiplier: f64,
    /// Threshold used when the quantity pool is empty, in the same unit as
    /// the quantities.
    pub fallback_high_cut: f64,
    /// Ceiling on legitimate same-day entries for one worker.
    pub max_count_per_day: usize,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            percentile: 0.99,
            high_multiplier: 1.5,
            fallback_high_cut: 200.0,
            max_count_per_day: 20,
        }
    }
}

/// The complete engine configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Anomaly detector tuning.
    pub anomaly: AnomalyConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_anomaly_config() {
        let config = AnomalyConfig::default();
        assert_eq!(config.percentile, 0.99);
        assert_eq!(config.high_multiplier, 1.5);
        assert_eq!(config.fallback_high_cut, 200.0);
        assert_eq!(config.max_count_per_day, 20);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: EngineConfig =
            serde_yaml::from_str("anomaly:\n  fallback_high_cut: 300.0\n").unwrap();
        assert_eq!(config.anomaly.fallback_high_cut, 300.0);
        assert_eq!(config.anomaly.max_count_per_day, 20);
        assert_eq!(config.anomaly.percentile, 0.99);
    }

    #[test]
    fn test_empty_yaml_is_all_defaults() {
        let config: EngineConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_serde_round_trip() {
        let config = EngineConfig {
            anomaly: AnomalyConfig {
                percentile: 0.95,
                high_multiplier: 2.0,
                fallback_high_cut: 150.0,
                max_count_per_day: 12,
            },
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: EngineConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }
}
