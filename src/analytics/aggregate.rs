//! Date-range aggregation.
//!
//! Recomputes per-worker totals and day counts restricted to the active date
//! interval. Unparseable dates are discarded and non-finite quantities are
//! coerced to 0, so partial bad data never blocks the rest of the dataset.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{RangeAggregate, WorkerRecord};

use super::calendar::parse_date;

/// Coerces a quantity to 0 when it is not a finite number.
pub fn safe_quantity(quantity: f64) -> f64 {
    if quantity.is_finite() { quantity } else { 0.0 }
}

/// Sums a day's quantities, coercing non-finite entries to 0.
pub fn day_total(quantities: &[f64]) -> f64 {
    quantities.iter().copied().map(safe_quantity).sum()
}

/// Aggregates every worker over the closed interval `[from, to]`.
///
/// Produces one [`RangeAggregate`] per worker, including workers with empty
/// or zero in-range totals — exclusion of those happens later, in the filter
/// stage. A `None` range (no parseable harvest date exists anywhere) yields
/// empty in-range data for every worker. Deterministic given identical
/// inputs; records are emitted in input order.
pub fn aggregate_range(
    workers: &[WorkerRecord],
    range: Option<(NaiveDate, NaiveDate)>,
) -> Vec<RangeAggregate> {
    workers
        .iter()
        .map(|worker| {
            let mut weighings_in_range = BTreeMap::new();
            let mut days_worked = 0;
            let mut total_quantity = 0.0;

            if let Some((from, to)) = range {
                for (raw_date, quantities) in &worker.weighings {
                    let Some(date) = parse_date(raw_date) else {
                        continue;
                    };
                    if date < from || date > to {
                        continue;
                    }

                    let day_sum = day_total(quantities);
                    if day_sum > 0.0 {
                        days_worked += 1;
                    }
                    total_quantity += day_sum;
                    weighings_in_range.insert(date, quantities.clone());
                }
            }

            RangeAggregate {
                id: worker.id.clone(),
                name: worker.name.clone(),
                group: worker.group.clone(),
                weighings_in_range,
                days_worked,
                total_quantity,
            }
        })
        .collect()
}
