//! Shareable URL state codec.
//!
//! Maps the session query state to and from the flat parameter set
//! `q, g, from, to, sort, dir, ps, p`, so a view can be restored from a
//! pasted link. Decoding never fails: an absent or invalid value falls back
//! to its default, and decoded dates pass through the same snap-and-clamp
//! logic as interactive date input. Intended for replace-style URL updates,
//! not push-navigation.

use std::collections::HashMap;

use url::form_urlencoded;

use crate::models::{GroupFilter, PageSize, QueryState, SortDirection, SortKey};

use super::calendar::{DateIndex, parse_date};

/// Decodes a parameter map into a [`QueryState`].
///
/// `known_groups` validates the `g` parameter; `index` resolves and snaps
/// the date bounds exactly as the session's date setters would.
pub fn decode_pairs(
    params: &HashMap<String, String>,
    known_groups: &[String],
    index: &DateIndex,
) -> QueryState {
    let search_text = params.get("q").cloned().unwrap_or_default();
    let group = params
        .get("g")
        .map(|raw| GroupFilter::from_param(raw, known_groups))
        .unwrap_or_default();

    let from = params.get("from").and_then(|raw| parse_date(raw));
    let to = params.get("to").and_then(|raw| parse_date(raw));
    let (date_from, date_to) = match index.snap_range(from, to) {
        Some((from, to)) => (Some(from), Some(to)),
        None => (None, None),
    };

    let sort_key = params
        .get("sort")
        .and_then(|raw| SortKey::from_param(raw))
        .unwrap_or(SortKey::Name);
    let sort_direction = params
        .get("dir")
        .map(|raw| SortDirection::from_param(raw))
        .unwrap_or(SortDirection::Asc);
    let page_size = params
        .get("ps")
        .and_then(|raw| PageSize::from_param(raw))
        .unwrap_or_default();
    let page_index = params
        .get("p")
        .and_then(|raw| raw.parse::<i64>().ok())
        .and_then(|p| usize::try_from(p).ok())
        .unwrap_or(0);

    QueryState {
        search_text,
        group,
        date_from,
        date_to,
        sort_key,
        sort_direction,
        page_size,
        page_index,
    }
}

/// Decodes a raw query string (no leading `?`). Repeated keys keep the last
/// occurrence.
pub fn decode_query(raw: &str, known_groups: &[String], index: &DateIndex) -> QueryState {
    let params: HashMap<String, String> = form_urlencoded::parse(raw.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    decode_pairs(&params, known_groups, index)
}

/// Encodes a state as ordered key/value pairs.
///
/// Only non-default-looking values are emitted: an empty (trimmed) query and
/// the ALL group are omitted; `sort`, `dir`, `ps` and `p` are always present
/// so a restored view sorts and pages identically.
pub fn encode_pairs(state: &QueryState) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();

    let query = state.search_text.trim();
    if !query.is_empty() {
        pairs.push(("q", query.to_string()));
    }
    if let GroupFilter::Group(label) = &state.group {
        pairs.push(("g", label.clone()));
    }
    if let Some(from) = state.date_from {
        pairs.push(("from", from.format("%Y-%m-%d").to_string()));
    }
    if let Some(to) = state.date_to {
        pairs.push(("to", to.format("%Y-%m-%d").to_string()));
    }
    pairs.push(("sort", state.sort_key.as_param().to_string()));
    pairs.push(("dir", state.sort_direction.as_param().to_string()));
    pairs.push(("ps", state.page_size.get().to_string()));
    pairs.push(("p", state.page_index.to_string()));

    pairs
}

/// Encodes a state as a percent-encoded query string (no leading `?`).
pub fn encode_query(state: &QueryState) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in encode_pairs(state) {
        serializer.append_pair(key, &value);
    }
    serializer.finish()
}
