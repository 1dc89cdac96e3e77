//! Per-worker aggregate over the active date range.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A worker's weighing data restricted to the active date interval.
///
/// Recomputed in full whenever the dataset or the active range changes; it
/// carries no lifecycle of its own. Workers whose in-range total is zero are
/// still represented here — exclusion happens later, in the filter stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeAggregate {
    /// Normalized worker identifier.
    pub id: String,
    /// The worker's display name.
    pub name: String,
    /// Optional group label.
    pub group: Option<String>,
    /// In-range dates to the quantities recorded on them.
    pub weighings_in_range: BTreeMap<NaiveDate, Vec<f64>>,
    /// Count of in-range dates whose summed quantity is strictly positive.
    pub days_worked: u32,
    /// Sum of all in-range quantities.
    pub total_quantity: f64,
}
