//! Heuristic anomaly detection over the in-range weighing data.
//!
//! The high-value threshold is derived dynamically from the 99th percentile
//! of every individual in-range quantity, so it tracks the crop being
//! weighed. This is a first-pass classifier meant to prompt manual review,
//! not a statistical test: false positives and negatives are acceptable,
//! determinism given identical inputs is required.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::AnomalyConfig;
use crate::models::RangeAggregate;

use super::aggregate::safe_quantity;

/// The thresholds a day-entry is judged against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyThresholds {
    /// Ceiling for a single quantity; anything above it is flagged.
    pub high_cut: f64,
    /// Ceiling on the number of entries recorded for one worker on one day.
    pub max_count_per_day: usize,
}

/// Anomaly findings for one worker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnomalyFlag {
    /// True iff at least one in-range date was flagged.
    pub has_anomaly: bool,
    /// The flagged dates.
    pub flagged_dates: BTreeSet<NaiveDate>,
}

/// Nearest-rank percentile of a pool of values.
///
/// Non-finite values are ignored. The rank is `floor((n - 1) * p)`, clamped
/// into bounds on the ascending-sorted pool. Returns `None` when the pool
/// has no finite values.
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    let mut pool: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if pool.is_empty() {
        return None;
    }
    pool.sort_unstable_by(f64::total_cmp);

    let rank = ((pool.len() - 1) as f64 * p).floor();
    let idx = (rank.max(0.0) as usize).min(pool.len() - 1);
    Some(pool[idx])
}

/// Derives the thresholds from the in-range dataset.
///
/// Every individual (not summed) in-range quantity across all workers forms
/// one pool; `high_cut` is `max(1, p99 * high_multiplier)` when the
/// percentile is defined, and the configured fallback constant otherwise, so
/// the rule stays meaningful with sparse data.
pub fn compute_thresholds(
    aggregates: &[RangeAggregate],
    config: &AnomalyConfig,
) -> AnomalyThresholds {
    let pool: Vec<f64> = aggregates
        .iter()
        .flat_map(|a| a.weighings_in_range.values())
        .flatten()
        .map(|q| safe_quantity(*q))
        .collect();

    let high_cut = match percentile(&pool, config.percentile) {
        Some(p) => (p * config.high_multiplier).max(1.0),
        None => config.fallback_high_cut,
    };

    AnomalyThresholds {
        high_cut,
        max_count_per_day: config.max_count_per_day,
    }
}

/// Flags suspicious day-entries for every worker.
///
/// A date is flagged if any of its quantities is non-positive, any quantity
/// exceeds `high_cut`, or the entry count exceeds `max_count_per_day`.
pub fn detect_anomalies(
    aggregates: &[RangeAggregate],
    thresholds: &AnomalyThresholds,
) -> HashMap<String, AnomalyFlag> {
    aggregates
        .iter()
        .map(|aggregate| {
            let mut flagged_dates = BTreeSet::new();

            for (date, quantities) in &aggregate.weighings_in_range {
                let bad_low = quantities.iter().any(|q| safe_quantity(*q) <= 0.0);
                let bad_high = quantities
                    .iter()
                    .any(|q| safe_quantity(*q) > thresholds.high_cut);
                let too_many = quantities.len() > thresholds.max_count_per_day;

                if bad_low || bad_high || too_many {
                    flagged_dates.insert(*date);
                }
            }

            let flag = AnomalyFlag {
                has_anomaly: !flagged_dates.is_empty(),
                flagged_dates,
            };
            (aggregate.id.clone(), flag)
        })
        .collect()
}
