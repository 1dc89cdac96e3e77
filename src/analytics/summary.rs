//! Summary projections over the aggregated set.
//!
//! Pure chart/ranking sources: totals per group, totals per day for the
//! active group, and top performers. Rendering is an external collaborator;
//! these only shape the numbers. Workers with a zero in-range total are
//! excluded everywhere, matching the filtered views.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{GroupFilter, RangeAggregate};

use super::aggregate::day_total;

/// Bucket label for workers without a group.
pub const UNGROUPED_LABEL: &str = "—";

/// Number of rows in a top-performers ranking.
pub const TOP_LIMIT: usize = 10;

/// Total in-range quantity for one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTotal {
    /// The group label, or [`UNGROUPED_LABEL`].
    pub group: String,
    /// Summed in-range quantity across the group's workers.
    pub total_quantity: f64,
}

/// Total quantity recorded on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    /// The harvest date.
    pub date: NaiveDate,
    /// Summed quantity across all matching workers on that date.
    pub total_quantity: f64,
}

/// Totals per group, descending by quantity.
pub fn group_totals(aggregates: &[RangeAggregate]) -> Vec<GroupTotal> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for aggregate in aggregates {
        if aggregate.total_quantity <= 0.0 {
            continue;
        }
        let label = aggregate.group.as_deref().unwrap_or(UNGROUPED_LABEL);
        *totals.entry(label).or_insert(0.0) += aggregate.total_quantity;
    }

    let mut rows: Vec<GroupTotal> = totals
        .into_iter()
        .map(|(group, total_quantity)| GroupTotal {
            group: group.to_string(),
            total_quantity,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.total_quantity
            .total_cmp(&a.total_quantity)
            .then_with(|| a.group.cmp(&b.group))
    });
    rows
}

/// Per-date totals for the active group (or all groups), ascending by date.
pub fn daily_totals(aggregates: &[RangeAggregate], group: &GroupFilter) -> Vec<DailyTotal> {
    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for aggregate in aggregates {
        if aggregate.total_quantity <= 0.0 || !group.matches(aggregate.group.as_deref()) {
            continue;
        }
        for (date, quantities) in &aggregate.weighings_in_range {
            *totals.entry(*date).or_insert(0.0) += day_total(quantities);
        }
    }

    totals
        .into_iter()
        .map(|(date, total_quantity)| DailyTotal {
            date,
            total_quantity,
        })
        .collect()
}

/// The top workers by in-range total, optionally restricted to one group.
pub fn top_workers<'a>(
    aggregates: &'a [RangeAggregate],
    group: Option<&str>,
    limit: usize,
) -> Vec<&'a RangeAggregate> {
    let mut rows: Vec<&RangeAggregate> = aggregates
        .iter()
        .filter(|a| a.total_quantity > 0.0)
        .filter(|a| group.is_none() || a.group.as_deref() == group)
        .collect();
    rows.sort_by(|a, b| {
        b.total_quantity
            .total_cmp(&a.total_quantity)
            .then_with(|| a.id.cmp(&b.id))
    });
    rows.truncate(limit);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn aggregate(id: &str, group: Option<&str>, days: &[(&str, &[f64])]) -> RangeAggregate {
        let weighings_in_range: BTreeMap<NaiveDate, Vec<f64>> = days
            .iter()
            .map(|(d, qs)| (date(d), qs.to_vec()))
            .collect();
        let total_quantity = weighings_in_range.values().map(|qs| day_total(qs)).sum();
        RangeAggregate {
            id: id.to_string(),
            name: format!("Worker {id}"),
            group: group.map(str::to_string),
            days_worked: 0,
            total_quantity,
            weighings_in_range,
        }
    }

    #[test]
    fn test_group_totals_descending_with_ungrouped_bucket() {
        let aggregates = vec![
            aggregate("a", Some("Norte"), &[("2024-01-01", &[10.0])]),
            aggregate("b", Some("Sur"), &[("2024-01-01", &[50.0])]),
            aggregate("c", Some("Norte"), &[("2024-01-02", &[15.0])]),
            aggregate("d", None, &[("2024-01-01", &[5.0])]),
        ];

        let rows = group_totals(&aggregates);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].group, "Sur");
        assert_eq!(rows[0].total_quantity, 50.0);
        assert_eq!(rows[1].group, "Norte");
        assert_eq!(rows[1].total_quantity, 25.0);
        assert_eq!(rows[2].group, UNGROUPED_LABEL);
    }

    #[test]
    fn test_group_totals_skip_zero_total_workers() {
        let aggregates = vec![aggregate("a", Some("Norte"), &[("2024-01-01", &[0.0])])];
        assert!(group_totals(&aggregates).is_empty());
    }

    #[test]
    fn test_daily_totals_ascending_across_workers() {
        let aggregates = vec![
            aggregate("a", Some("Norte"), &[("2024-01-02", &[10.0])]),
            aggregate("b", Some("Sur"), &[("2024-01-01", &[7.0]), ("2024-01-02", &[3.0])]),
        ];

        let rows = daily_totals(&aggregates, &GroupFilter::All);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, date("2024-01-01"));
        assert_eq!(rows[0].total_quantity, 7.0);
        assert_eq!(rows[1].total_quantity, 13.0);
    }

    #[test]
    fn test_daily_totals_respect_active_group() {
        let aggregates = vec![
            aggregate("a", Some("Norte"), &[("2024-01-01", &[10.0])]),
            aggregate("b", Some("Sur"), &[("2024-01-01", &[7.0])]),
        ];

        let rows = daily_totals(&aggregates, &GroupFilter::Group("Sur".to_string()));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].total_quantity, 7.0);
    }

    #[test]
    fn test_top_workers_overall_and_by_group() {
        let aggregates = vec![
            aggregate("a", Some("Norte"), &[("2024-01-01", &[30.0])]),
            aggregate("b", Some("Sur"), &[("2024-01-01", &[50.0])]),
            aggregate("c", Some("Norte"), &[("2024-01-01", &[40.0])]),
            aggregate("z", Some("Norte"), &[("2024-01-01", &[0.0])]),
        ];

        let overall = top_workers(&aggregates, None, TOP_LIMIT);
        let overall_ids: Vec<&str> = overall.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(overall_ids, vec!["b", "c", "a"]);

        let norte = top_workers(&aggregates, Some("Norte"), 1);
        assert_eq!(norte.len(), 1);
        assert_eq!(norte[0].id, "c");
    }
}
