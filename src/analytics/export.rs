//! Anonymized summary export.
//!
//! Projects the sorted result set into downloadable summary records: a fresh
//! random identifier per worker, name, group, days worked, and the rounded
//! total. The original worker identifier and per-day detail are deliberately
//! omitted; this is a privacy-preserving projection, not a full export. The
//! randomness source is injectable so callers can make the projection
//! deterministic under test.

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{GroupFilter, RangeAggregate};

/// Alphabet for anonymized identifiers. Visually confusable characters
/// (I, O, 0, 1) are excluded.
pub const EXPORT_ID_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Length of an anonymized identifier.
pub const EXPORT_ID_LENGTH: usize = 8;

/// One anonymized summary record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    /// Freshly generated random identifier; unrelated to the worker id.
    pub id: String,
    /// The worker's display name.
    pub name: String,
    /// Group label, empty when the worker has none.
    pub group: String,
    /// Days worked in the active range.
    pub days_worked: u32,
    /// Total in-range quantity, rounded to 2 decimal places.
    pub total_quantity: f64,
}

/// Generates one anonymized identifier from the injected randomness source.
pub fn anonymous_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..EXPORT_ID_LENGTH)
        .map(|_| EXPORT_ID_ALPHABET[rng.gen_range(0..EXPORT_ID_ALPHABET.len())] as char)
        .collect()
}

/// Builds the anonymized projection of the sorted (full, unpaginated) set.
pub fn build_export<R: Rng + ?Sized>(
    sorted: &[RangeAggregate],
    rng: &mut R,
) -> Vec<ExportRecord> {
    sorted
        .iter()
        .map(|aggregate| ExportRecord {
            id: anonymous_id(rng),
            name: aggregate.name.clone(),
            group: aggregate.group.clone().unwrap_or_default(),
            days_worked: aggregate.days_worked,
            total_quantity: round2(aggregate.total_quantity),
        })
        .collect()
}

/// Download filename encoding the active group and date range.
pub fn export_filename(group: &GroupFilter, range: Option<(NaiveDate, NaiveDate)>) -> String {
    let group_label = group.as_param();
    match range {
        Some((from, to)) => format!(
            "harvest_summary_{group_label}_{}_{}.json",
            from.format("%Y-%m-%d"),
            to.format("%Y-%m-%d")
        ),
        None => format!("harvest_summary_{group_label}.json"),
    }
}

/// Serializes the records as formatted JSON for download.
pub fn to_pretty_json(records: &[ExportRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
