//! The pure transformation pipeline over harvest weighing records.
//!
//! This module contains the analytics stages, in dependency order: the
//! calendar of available harvest dates, the date-range aggregator, the
//! anomaly detector, the search ranker, the filter/sorter/paginator chain,
//! the URL state codec, the summary projections, and the anonymized exporter.
//! Every stage is a side-effect-free function from immutable inputs to an
//! immutable value; the session orchestrator re-invokes the chain on any
//! state change.

mod aggregate;
mod anomaly;
mod calendar;
mod export;
mod filter;
mod paginate;
mod search;
mod sort;
mod summary;
mod url_state;

pub use aggregate::{aggregate_range, day_total, safe_quantity};
pub use anomaly::{AnomalyFlag, AnomalyThresholds, compute_thresholds, detect_anomalies, percentile};
pub use calendar::DateIndex;
pub use export::{
    EXPORT_ID_ALPHABET, EXPORT_ID_LENGTH, ExportRecord, anonymous_id, build_export,
    export_filename, to_pretty_json,
};
pub use filter::apply_filter;
pub use paginate::{Page, jump_to_page, page_count, paginate};
pub use search::{SUGGESTION_LIMIT, normalize_id, normalize_name, rank_suggestions};
pub use sort::{compare_names, sort_aggregates, toggle_sort};
pub use summary::{
    DailyTotal, GroupTotal, TOP_LIMIT, UNGROUPED_LABEL, daily_totals, group_totals, top_workers,
};
pub use url_state::{decode_pairs, decode_query, encode_pairs, encode_query};
