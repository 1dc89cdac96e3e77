//! Group and free-text filtering of the aggregated set.

use crate::models::{GroupFilter, RangeAggregate};

use super::search::{normalize_id, normalize_name};

/// Applies the group and query filters to the aggregated set.
///
/// Workers with a non-positive in-range total are always dropped. When a
/// specific group is active the worker's group must match. A non-empty query
/// requires a substring match on the normalized name form or the normalized
/// id form — plain containment, no scoring. Idempotent for a fixed
/// `(group, query)` pair.
pub fn apply_filter(
    aggregates: &[RangeAggregate],
    group: &GroupFilter,
    query: &str,
) -> Vec<RangeAggregate> {
    let name_query = normalize_name(query.trim());
    let id_query = normalize_id(query.trim());

    aggregates
        .iter()
        .filter(|a| a.total_quantity > 0.0)
        .filter(|a| group.matches(a.group.as_deref()))
        .filter(|a| {
            if name_query.is_empty() && id_query.is_empty() {
                return true;
            }
            let by_name = !name_query.is_empty() && normalize_name(&a.name).contains(&name_query);
            let by_id = !id_query.is_empty() && normalize_id(&a.id).contains(&id_query);
            by_name || by_id
        })
        .cloned()
        .collect()
}
