//! Response types for the HTTP read surface.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analytics::{AnomalyFlag, AnomalyThresholds, DailyTotal, GroupTotal};
use crate::models::RangeAggregate;

/// One row of the paginated worker table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerRow {
    /// Worker identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Group label, if any.
    pub group: Option<String>,
    /// Days worked within the active range.
    pub days_worked: u32,
    /// Total in-range quantity.
    pub total_quantity: f64,
    /// True when at least one in-range date is flagged.
    pub has_anomaly: bool,
    /// The flagged dates.
    pub flagged_dates: Vec<NaiveDate>,
}

impl WorkerRow {
    /// Builds a row from an aggregate and its anomaly findings.
    pub fn from_aggregate(aggregate: &RangeAggregate, flag: Option<&AnomalyFlag>) -> Self {
        Self {
            id: aggregate.id.clone(),
            name: aggregate.name.clone(),
            group: aggregate.group.clone(),
            days_worked: aggregate.days_worked,
            total_quantity: aggregate.total_quantity,
            has_anomaly: flag.is_some_and(|f| f.has_anomaly),
            flagged_dates: flag
                .map(|f| f.flagged_dates.iter().copied().collect())
                .unwrap_or_default(),
        }
    }
}

/// Response body for `GET /workers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkersResponse {
    /// The rows of the current page.
    pub workers: Vec<WorkerRow>,
    /// Effective 0-based page index.
    pub page: usize,
    /// Total number of pages.
    pub page_count: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Total matching workers across all pages.
    pub total: usize,
    /// Earliest harvest date in the dataset.
    pub date_min: Option<NaiveDate>,
    /// Latest harvest date in the dataset.
    pub date_max: Option<NaiveDate>,
    /// Distinct group labels, sorted.
    pub groups: Vec<String>,
    /// Thresholds the anomaly flags were derived from.
    pub thresholds: AnomalyThresholds,
    /// Canonical query string reproducing this view.
    pub query: String,
}

/// One autocomplete suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionRow {
    /// Worker identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Group label, if any.
    pub group: Option<String>,
    /// Total in-range quantity.
    pub total_quantity: f64,
}

impl From<&RangeAggregate> for SuggestionRow {
    fn from(aggregate: &RangeAggregate) -> Self {
        Self {
            id: aggregate.id.clone(),
            name: aggregate.name.clone(),
            group: aggregate.group.clone(),
            total_quantity: aggregate.total_quantity,
        }
    }
}

/// One row of a top-performers ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopRow {
    /// Worker identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Group label, if any.
    pub group: Option<String>,
    /// Total in-range quantity.
    pub total_quantity: f64,
}

impl From<&RangeAggregate> for TopRow {
    fn from(aggregate: &RangeAggregate) -> Self {
        Self {
            id: aggregate.id.clone(),
            name: aggregate.name.clone(),
            group: aggregate.group.clone(),
            total_quantity: aggregate.total_quantity,
        }
    }
}

/// Response body for `GET /summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// In-range totals per group, descending.
    pub group_totals: Vec<GroupTotal>,
    /// Per-date totals for the active group, ascending.
    pub daily_totals: Vec<DailyTotal>,
    /// Top workers across all groups.
    pub top_overall: Vec<TopRow>,
    /// Top workers within the selected group.
    pub top_group: Vec<TopRow>,
    /// The group the `top_group` ranking was computed for.
    pub top_group_label: Option<String>,
}

/// Error body returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl ApiError {
    /// Creates an error body.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
