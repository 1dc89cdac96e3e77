//! The calendar of available harvest dates.
//!
//! Date inputs are never taken at face value: they are clamped to the
//! dataset's date bounds and snapped to the nearest date that actually has a
//! harvest entry. [`DateIndex`] implements that logic once, shared by the
//! session's date setters and by URL state decoding.

use chrono::NaiveDate;

use crate::models::WorkerRecord;

/// The sorted set of distinct dates that carry at least one weighing entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateIndex {
    dates: Vec<NaiveDate>,
}

impl DateIndex {
    /// Builds the index from the raw worker records.
    ///
    /// Unparseable date keys are skipped; they never become snappable dates.
    pub fn from_workers(workers: &[WorkerRecord]) -> Self {
        let mut dates: Vec<NaiveDate> = workers
            .iter()
            .flat_map(|w| w.weighings.keys())
            .filter_map(|raw| parse_date(raw))
            .collect();
        dates.sort_unstable();
        dates.dedup();
        Self { dates }
    }

    /// Returns true when no worker has any parseable harvest date.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// The earliest harvest date, if any.
    pub fn min(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    /// The latest harvest date, if any.
    pub fn max(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// All indexed dates, ascending.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Clamps a date into `[min, max]`, then snaps it to the nearest date
    /// that has a harvest entry. Ties go to the earlier date. Returns `None`
    /// only when the index is empty.
    pub fn snap(&self, date: NaiveDate) -> Option<NaiveDate> {
        let (min, max) = (self.min()?, self.max()?);
        let target = date.clamp(min, max);

        let idx = self.dates.partition_point(|d| *d < target);
        if idx == self.dates.len() {
            return Some(max);
        }
        if self.dates[idx] == target || idx == 0 {
            return Some(self.dates[idx]);
        }

        let before = self.dates[idx - 1];
        let after = self.dates[idx];
        let gap_before = (target - before).num_days();
        let gap_after = (after - target).num_days();
        Some(if gap_before <= gap_after { before } else { after })
    }

    /// Resolves a raw `[from, to]` pair into a snapped, ordered interval.
    ///
    /// Missing bounds default to the dataset min/max. If the snapped bounds
    /// invert, both collapse to the `to` bound (it is applied last), so the
    /// interval always spans at least one day. Returns `None` only when the
    /// index is empty.
    pub fn snap_range(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Option<(NaiveDate, NaiveDate)> {
        let (min, max) = (self.min()?, self.max()?);
        let from = self.snap(from.unwrap_or(min))?;
        let to = self.snap(to.unwrap_or(max))?;
        if from > to {
            Some((to, to))
        } else {
            Some((from, to))
        }
    }
}

/// Parses an ISO `YYYY-MM-DD` date string, returning `None` when malformed.
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
