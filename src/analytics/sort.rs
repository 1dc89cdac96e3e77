//! Ordering of the filtered set.
//!
//! Names compare with Spanish collation: case- and diacritic-insensitive,
//! with ñ ordered as its own letter between n and o. Identifiers compare on
//! their normalized digits-plus-k form. Every comparator ends in a
//! deterministic tiebreak, so flipping the direction reverses the order
//! exactly, equal keys included.

use std::cmp::Ordering;

use crate::models::{QueryState, RangeAggregate, SortDirection, SortKey};

use super::search::normalize_id;

/// Primary collation weight of one character under Spanish rules.
///
/// Accented vowels weigh as their base letter; ñ lands between n and o.
/// Weights are spaced so every base letter keeps room for a successor.
fn collation_weight(c: char) -> u32 {
    let folded = match c {
        'á' | 'à' | 'ä' | 'â' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        _ => c,
    };
    if folded == 'ñ' {
        'n' as u32 * 2 + 1
    } else {
        folded as u32 * 2
    }
}

/// Compares two names with Spanish collation.
///
/// # Example
///
/// ```
/// use harvest_engine::analytics::compare_names;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare_names("Ñandú", "Naranjo"), Ordering::Greater);
/// assert_eq!(compare_names("Ñandú", "Olmos"), Ordering::Less);
/// ```
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();
    let weights_a = a_lower.chars().map(collation_weight);
    let weights_b = b_lower.chars().map(collation_weight);
    weights_a.cmp(weights_b).then_with(|| a.cmp(b))
}

/// Compares two aggregates on the given key, ascending.
fn compare_on(a: &RangeAggregate, b: &RangeAggregate, key: SortKey) -> Ordering {
    let primary = match key {
        SortKey::Name => compare_names(&a.name, &b.name),
        SortKey::Id => normalize_id(&a.id).cmp(&normalize_id(&b.id)),
        SortKey::DaysWorked => a.days_worked.cmp(&b.days_worked),
        SortKey::Total => a.total_quantity.total_cmp(&b.total_quantity),
    };
    // The tiebreak participates in direction reversal, keeping the order a
    // total one for every key.
    primary
        .then_with(|| normalize_id(&a.id).cmp(&normalize_id(&b.id)))
        .then_with(|| a.id.cmp(&b.id))
}

/// Orders the filtered set in place by the chosen key and direction.
pub fn sort_aggregates(rows: &mut [RangeAggregate], key: SortKey, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let ordering = compare_on(a, b, key);
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// The header-click toggle rule.
///
/// Selecting the active key flips the direction; selecting a new key resets
/// the direction to that key's default.
pub fn toggle_sort(state: &mut QueryState, selected: SortKey) {
    if state.sort_key == selected {
        state.sort_direction = state.sort_direction.flipped();
    } else {
        state.sort_key = selected;
        state.sort_direction = selected.default_direction();
    }
}
