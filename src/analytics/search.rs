//! Autocomplete search ranking.
//!
//! Candidates are scored against two normalized forms of the query: a
//! case-folded, diacritic-stripped name form, and a digits-plus-k id form
//! that ignores formatting punctuation in identifiers. This produces ranked
//! suggestions, not the main filtered view; containment filtering lives in
//! the filter stage.

use std::cmp::Reverse;

use crate::models::{GroupFilter, RangeAggregate};

/// Maximum number of suggestions returned.
pub const SUGGESTION_LIMIT: usize = 8;

const NAME_PREFIX_SCORE: u32 = 50;
const NAME_SUBSTRING_SCORE: u32 = 30;
const ID_PREFIX_SCORE: u32 = 80;
const ID_SUBSTRING_SCORE: u32 = 40;
const GROUP_BONUS: u32 = 5;

/// Folds a lowercase character to its unaccented base letter.
fn fold_char(c: char) -> char {
    match c {
        'á' | 'à' | 'ä' | 'â' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' | 'õ' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        _ => c,
    }
}

/// Normalizes text into its case-folded, diacritic-stripped name form.
///
/// # Example
///
/// ```
/// use harvest_engine::analytics::normalize_name;
///
/// assert_eq!(normalize_name("Peña Núñez"), "pena nunez");
/// ```
pub fn normalize_name(raw: &str) -> String {
    raw.to_lowercase().chars().map(fold_char).collect()
}

/// Normalizes an identifier into its digits-plus-k form.
///
/// Keeps only ASCII digits and the letter `k` (case-insensitive), so queries
/// match identifiers regardless of dots and dashes.
///
/// # Example
///
/// ```
/// use harvest_engine::analytics::normalize_id;
///
/// assert_eq!(normalize_id("12.345.678-K"), "12345678k");
/// ```
pub fn normalize_id(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == 'k')
        .collect()
}

/// Scores one candidate against the normalized query forms.
fn score(aggregate: &RangeAggregate, name_query: &str, id_query: &str, group: &GroupFilter) -> u32 {
    let mut score = 0;

    if !name_query.is_empty() {
        let name = normalize_name(&aggregate.name);
        if name.starts_with(name_query) {
            score += NAME_PREFIX_SCORE;
        } else if name.contains(name_query) {
            score += NAME_SUBSTRING_SCORE;
        }
    }

    if !id_query.is_empty() {
        let id = normalize_id(&aggregate.id);
        if id.starts_with(id_query) {
            score += ID_PREFIX_SCORE;
        } else if id.contains(id_query) {
            score += ID_SUBSTRING_SCORE;
        }
    }

    if let GroupFilter::Group(label) = group
        && aggregate.group.as_deref() == Some(label.as_str())
    {
        score += GROUP_BONUS;
    }

    score
}

/// Ranks workers against a free-text query for autocomplete suggestions.
///
/// Workers with a zero in-range total never appear. Candidates scoring 0 are
/// dropped, the rest are ordered by score descending (ties keep input
/// order), truncated to [`SUGGESTION_LIMIT`]. An empty query (in both
/// normalized forms) yields no suggestions.
pub fn rank_suggestions<'a>(
    aggregates: &'a [RangeAggregate],
    query: &str,
    group: &GroupFilter,
) -> Vec<&'a RangeAggregate> {
    let name_query = normalize_name(query.trim());
    let id_query = normalize_id(query.trim());
    if name_query.is_empty() && id_query.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(u32, &RangeAggregate)> = aggregates
        .iter()
        .filter(|a| a.total_quantity > 0.0)
        .map(|a| (score(a, &name_query, &id_query, group), a))
        .filter(|(s, _)| *s > 0)
        .collect();

    scored.sort_by_key(|(s, _)| Reverse(*s));
    scored
        .into_iter()
        .take(SUGGESTION_LIMIT)
        .map(|(_, a)| a)
        .collect()
}
