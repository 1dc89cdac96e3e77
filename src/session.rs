//! The viewing session: one immutable raw store, one mutable query state.
//!
//! All derived structures are pure functions of the pair and are recomputed
//! in full, bottom-up, on every state change — there is no cache to
//! invalidate and no incremental patching. [`compute_view`] is the explicit
//! pipeline; [`Session`] owns the inputs and re-invokes it.

use std::collections::HashMap;

use chrono::NaiveDate;
use rand::Rng;

use crate::analytics::{
    AnomalyFlag, AnomalyThresholds, DateIndex, ExportRecord, Page, aggregate_range, apply_filter,
    build_export, compute_thresholds, detect_anomalies, encode_query, export_filename,
    jump_to_page, paginate, rank_suggestions, sort_aggregates, toggle_sort,
};
use crate::config::EngineConfig;
use crate::models::{GroupFilter, PageSize, QueryState, RangeAggregate, SortKey, WorkerRecord};

/// The fully recomputed derived view for one state.
///
/// A plain owned value: it lives and dies with the recompute pass that
/// produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    /// The resolved active date interval, if the dataset has dates.
    pub range: Option<(NaiveDate, NaiveDate)>,
    /// Thresholds derived from the in-range data.
    pub thresholds: AnomalyThresholds,
    /// Anomaly findings keyed by worker id.
    pub anomalies: HashMap<String, AnomalyFlag>,
    /// Ranked autocomplete suggestions for the current query.
    pub suggestions: Vec<RangeAggregate>,
    /// The filtered, sorted, unpaginated result set.
    pub sorted: Vec<RangeAggregate>,
    /// The current page of `sorted`.
    pub page: Page,
}

/// Collects the sorted list of distinct group labels in a dataset.
pub fn collect_groups(workers: &[WorkerRecord]) -> Vec<String> {
    let mut groups: Vec<String> = workers.iter().filter_map(|w| w.group.clone()).collect();
    groups.sort_unstable();
    groups.dedup();
    groups
}

/// Runs the whole derivation pipeline for one `(dataset, state)` pair.
///
/// Deterministic and side-effect free; the session and the HTTP handlers
/// both go through here.
pub fn compute_view(
    workers: &[WorkerRecord],
    config: &EngineConfig,
    index: &DateIndex,
    state: &QueryState,
) -> ViewSnapshot {
    let range = index.snap_range(state.date_from, state.date_to);
    let aggregates = aggregate_range(workers, range);
    let thresholds = compute_thresholds(&aggregates, &config.anomaly);
    let anomalies = detect_anomalies(&aggregates, &thresholds);
    let suggestions = rank_suggestions(&aggregates, &state.search_text, &state.group)
        .into_iter()
        .cloned()
        .collect();

    let mut sorted = apply_filter(&aggregates, &state.group, &state.search_text);
    sort_aggregates(&mut sorted, state.sort_key, state.sort_direction);
    let page = paginate(&sorted, state.page_size, state.page_index);

    ViewSnapshot {
        range,
        thresholds,
        anomalies,
        suggestions,
        sorted,
        page,
    }
}

/// A viewing session over one loaded dataset.
pub struct Session {
    workers: Vec<WorkerRecord>,
    index: DateIndex,
    groups: Vec<String>,
    config: EngineConfig,
    state: QueryState,
}

impl Session {
    /// Creates a session with the default query state over the full range.
    pub fn new(workers: Vec<WorkerRecord>, config: EngineConfig) -> Self {
        let index = DateIndex::from_workers(&workers);
        let groups = collect_groups(&workers);
        let mut state = QueryState::default();
        if let Some((from, to)) = index.snap_range(None, None) {
            state.date_from = Some(from);
            state.date_to = Some(to);
        }
        Self {
            workers,
            index,
            groups,
            config,
            state,
        }
    }

    /// The current query state.
    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Distinct group labels present in the dataset, sorted.
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// The calendar of available harvest dates.
    pub fn date_index(&self) -> &DateIndex {
        &self.index
    }

    /// The raw records, as loaded.
    pub fn workers(&self) -> &[WorkerRecord] {
        &self.workers
    }

    /// Recomputes the full derived view for the current state.
    pub fn snapshot(&self) -> ViewSnapshot {
        compute_view(&self.workers, &self.config, &self.index, &self.state)
    }

    /// Sets the search text.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.state.search_text = text.into();
        self.state.page_index = 0;
    }

    /// Sets the active group filter.
    pub fn set_group(&mut self, group: GroupFilter) {
        self.state.group = group;
        self.state.page_index = 0;
    }

    /// Sets the start of the date interval.
    ///
    /// The date is clamped and snapped to an actual harvest date; if it
    /// would pass the current end, both bounds collapse onto it.
    pub fn set_date_from(&mut self, raw: NaiveDate) {
        let Some(snapped) = self.index.snap(raw) else {
            return;
        };
        if self.state.date_to.is_some_and(|to| snapped > to) {
            self.state.date_to = Some(snapped);
        }
        self.state.date_from = Some(snapped);
        self.state.page_index = 0;
    }

    /// Sets the end of the date interval, mirroring [`Session::set_date_from`].
    pub fn set_date_to(&mut self, raw: NaiveDate) {
        let Some(snapped) = self.index.snap(raw) else {
            return;
        };
        if self.state.date_from.is_some_and(|from| snapped < from) {
            self.state.date_from = Some(snapped);
        }
        self.state.date_to = Some(snapped);
        self.state.page_index = 0;
    }

    /// Applies the header-click sort toggle. Does not reset the page.
    pub fn toggle_sort(&mut self, key: SortKey) {
        toggle_sort(&mut self.state, key);
    }

    /// Sets the page size.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.state.page_size = page_size;
        self.state.page_index = 0;
    }

    /// Requests a 0-based page; the effective page is clamped at view time.
    pub fn go_to_page(&mut self, page_index: usize) {
        self.state.page_index = page_index;
    }

    /// 1-based "jump to page" convenience. Clamps against the current
    /// filtered set.
    pub fn jump_to_page(&mut self, page_1based: i64) {
        let view = self.snapshot();
        self.state.page_index = jump_to_page(page_1based, view.sorted.len(), self.state.page_size);
    }

    /// Clears the search, group, and date filters; sorting is kept.
    pub fn clear(&mut self) {
        self.state.search_text.clear();
        self.state.group = GroupFilter::All;
        if let Some((from, to)) = self.index.snap_range(None, None) {
            self.state.date_from = Some(from);
            self.state.date_to = Some(to);
        }
        self.state.page_index = 0;
    }

    /// Replaces the whole state, re-snapping the decoded date bounds.
    pub fn apply(&mut self, state: QueryState) {
        let (date_from, date_to) = match self.index.snap_range(state.date_from, state.date_to) {
            Some((from, to)) => (Some(from), Some(to)),
            None => (None, None),
        };
        self.state = QueryState {
            date_from,
            date_to,
            ..state
        };
    }

    /// Encodes the current state as a shareable query string.
    ///
    /// The emitted page index is the effective (clamped) one, so the encoded
    /// URL always restores the page being shown.
    pub fn canonical_query(&self) -> String {
        let view = self.snapshot();
        let state = QueryState {
            page_index: view.page.page_index,
            ..self.state.clone()
        };
        encode_query(&state)
    }

    /// Builds the anonymized export of the current sorted set, plus its
    /// download filename.
    pub fn export<R: Rng + ?Sized>(&self, rng: &mut R) -> (Vec<ExportRecord>, String) {
        let view = self.snapshot();
        let records = build_export(&view.sorted, rng);
        let filename = export_filename(&self.state.group, view.range);
        (records, filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SortDirection, SortKey};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::BTreeMap;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn worker(id: &str, name: &str, group: Option<&str>, days: &[(&str, &[f64])]) -> WorkerRecord {
        let weighings: BTreeMap<String, Vec<f64>> = days
            .iter()
            .map(|(d, qs)| (d.to_string(), qs.to_vec()))
            .collect();
        WorkerRecord {
            id: id.to_string(),
            name: name.to_string(),
            group: group.map(str::to_string),
            weighings,
        }
    }

    fn fixture() -> Session {
        let workers = vec![
            worker(
                "12.345.678-5",
                "María Peña",
                Some("Norte"),
                &[("2024-01-01", &[10.0, 12.0]), ("2024-01-05", &[9.0])],
            ),
            worker(
                "9.876.543-K",
                "José Soto",
                Some("Sur"),
                &[("2024-01-05", &[20.0]), ("2024-01-10", &[30.0])],
            ),
            worker("5.555.555-5", "Ana Díaz", None, &[("2024-01-10", &[4.0])]),
            worker("1.111.111-1", "Cero Total", Some("Norte"), &[("2024-01-01", &[0.0])]),
        ];
        Session::new(workers, EngineConfig::default())
    }

    #[test]
    fn test_new_session_spans_the_full_range() {
        let session = fixture();
        assert_eq!(session.state().date_from, Some(date("2024-01-01")));
        assert_eq!(session.state().date_to, Some(date("2024-01-10")));
        assert_eq!(session.groups(), &["Norte".to_string(), "Sur".to_string()]);
    }

    #[test]
    fn test_snapshot_default_view() {
        let view = fixture().snapshot();
        // Zero-total worker is excluded; default sort is name ascending.
        let names: Vec<&str> = view.sorted.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Ana Díaz", "José Soto", "María Peña"]);
        assert_eq!(view.page.items.len(), 3);
        assert_eq!(view.page.page_count, 1);
        // The zero entry still flags its worker in the anomaly map.
        assert!(view.anomalies["1.111.111-1"].has_anomaly);
    }

    #[test]
    fn test_date_range_narrows_the_view() {
        let mut session = fixture();
        session.set_date_to(date("2024-01-05"));

        let view = session.snapshot();
        let names: Vec<&str> = view.sorted.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["José Soto", "María Peña"]);

        let maria = view.sorted.iter().find(|a| a.name == "María Peña").unwrap();
        assert_eq!(maria.total_quantity, 31.0);
        assert_eq!(maria.days_worked, 2);
    }

    #[test]
    fn test_set_date_from_past_end_collapses_interval() {
        let mut session = fixture();
        session.set_date_to(date("2024-01-05"));
        session.set_date_from(date("2024-01-10"));

        assert_eq!(session.state().date_from, Some(date("2024-01-10")));
        assert_eq!(session.state().date_to, Some(date("2024-01-10")));
    }

    #[test]
    fn test_set_date_snaps_to_harvest_days() {
        let mut session = fixture();
        session.set_date_from(date("2024-01-04"));
        assert_eq!(session.state().date_from, Some(date("2024-01-05")));
    }

    #[test]
    fn test_filter_changes_reset_the_page() {
        let mut session = fixture();
        session.go_to_page(3);
        session.set_search("maría");
        assert_eq!(session.state().page_index, 0);

        session.go_to_page(3);
        session.set_group(GroupFilter::Group("Sur".to_string()));
        assert_eq!(session.state().page_index, 0);

        session.go_to_page(3);
        session.set_page_size(PageSize::new(50).unwrap());
        assert_eq!(session.state().page_index, 0);
    }

    #[test]
    fn test_toggle_sort_keeps_page_and_flips() {
        let mut session = fixture();
        session.go_to_page(0);
        session.toggle_sort(SortKey::Total);
        assert_eq!(session.state().sort_key, SortKey::Total);
        assert_eq!(session.state().sort_direction, SortDirection::Desc);

        session.toggle_sort(SortKey::Total);
        assert_eq!(session.state().sort_direction, SortDirection::Asc);
    }

    #[test]
    fn test_jump_to_page_clamps_against_current_set() {
        let mut session = fixture();
        session.jump_to_page(99);
        assert_eq!(session.state().page_index, 0);
    }

    #[test]
    fn test_clear_keeps_sort() {
        let mut session = fixture();
        session.set_search("peña");
        session.set_group(GroupFilter::Group("Norte".to_string()));
        session.set_date_from(date("2024-01-05"));
        session.toggle_sort(SortKey::Total);

        session.clear();
        assert_eq!(session.state().search_text, "");
        assert_eq!(session.state().group, GroupFilter::All);
        assert_eq!(session.state().date_from, Some(date("2024-01-01")));
        assert_eq!(session.state().date_to, Some(date("2024-01-10")));
        assert_eq!(session.state().sort_key, SortKey::Total);
    }

    #[test]
    fn test_canonical_query_round_trips_through_apply() {
        let mut session = fixture();
        session.set_search("soto");
        session.set_group(GroupFilter::Group("Sur".to_string()));
        session.toggle_sort(SortKey::Total);

        let encoded = session.canonical_query();
        let decoded = crate::analytics::decode_query(&encoded, session.groups(), session.date_index());

        let mut restored = fixture();
        restored.apply(decoded);
        assert_eq!(restored.state(), session.state());
    }

    #[test]
    fn test_suggestions_come_from_the_pre_filter_set() {
        let mut session = fixture();
        // Group filter does not hide suggestions from other groups.
        session.set_group(GroupFilter::Group("Sur".to_string()));
        session.set_search("maría");

        let view = session.snapshot();
        assert!(view.sorted.is_empty());
        assert_eq!(view.suggestions.len(), 1);
        assert_eq!(view.suggestions[0].name, "María Peña");
    }

    #[test]
    fn test_export_uses_sorted_set_and_filename() {
        let mut session = fixture();
        session.set_group(GroupFilter::Group("Sur".to_string()));

        let (records, filename) = session.export(&mut StdRng::seed_from_u64(3));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "José Soto");
        assert_eq!(filename, "harvest_summary_Sur_2024-01-01_2024-01-10.json");
    }

    #[test]
    fn test_empty_dataset_view_is_empty_but_total() {
        let session = Session::new(Vec::new(), EngineConfig::default());
        let view = session.snapshot();
        assert_eq!(view.range, None);
        assert!(view.sorted.is_empty());
        assert_eq!(view.page.page_count, 1);
        assert_eq!(view.thresholds.high_cut, 200.0);
    }
}
