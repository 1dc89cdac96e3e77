//! Pagination of the sorted set.

use crate::models::{PageSize, RangeAggregate};

/// One page of the sorted result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// The rows on this page.
    pub items: Vec<RangeAggregate>,
    /// The effective 0-based page index after clamping.
    pub page_index: usize,
    /// Total number of pages, at least 1.
    pub page_count: usize,
    /// Total number of rows across all pages.
    pub total: usize,
}

/// Number of pages needed for `total` rows, never less than 1.
pub fn page_count(total: usize, page_size: PageSize) -> usize {
    total.div_ceil(page_size.get()).max(1)
}

/// Slices the requested page out of the sorted set.
///
/// The requested index is clamped into `[0, page_count - 1]`, so any input
/// produces a valid page.
pub fn paginate(sorted: &[RangeAggregate], page_size: PageSize, requested: usize) -> Page {
    let total = sorted.len();
    let page_count = page_count(total, page_size);
    let page_index = requested.min(page_count - 1);

    let start = page_index * page_size.get();
    let end = (start + page_size.get()).min(total);
    let items = if start < total {
        sorted[start..end].to_vec()
    } else {
        Vec::new()
    };

    Page {
        items,
        page_index,
        page_count,
        total,
    }
}

/// Maps a 1-based "jump to page" request to a clamped 0-based index.
///
/// Accepts any number; values below 1 land on the first page, values past
/// the end land on the last.
pub fn jump_to_page(requested: i64, total: usize, page_size: PageSize) -> usize {
    let last = page_count(total, page_size) - 1;
    usize::try_from(requested - 1).unwrap_or(0).min(last)
}
