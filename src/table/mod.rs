//! Log table support: search, sort, and pagination.

use crate::model::VisitorRecord;

/// One page of the log table.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    /// Rows on this page; never longer than the requested page size.
    pub items: &'a [T],
    /// The effective (clamped) 1-indexed page number.
    pub page: usize,
    /// Total number of pages, at least 1 even for an empty input.
    pub total_pages: usize,
    /// Total number of rows across all pages.
    pub total_items: usize,
}

/// Keeps rows whose string form contains `term`, case-insensitively.
///
/// Same semantics as the free-text filter predicate: a row matches if ANY
/// of its fields contains the term.
pub fn search<'a, I>(records: I, term: &str) -> Vec<&'a VisitorRecord>
where
    I: IntoIterator<Item = &'a VisitorRecord>,
{
    let needle = term.to_lowercase();
    records
        .into_iter()
        .filter(|record| record.matches_term(&needle))
        .collect()
}

/// Stable sort on the visit timestamp, direction chosen by the caller.
pub fn sort_by_timestamp(rows: &mut [&VisitorRecord], ascending: bool) {
    rows.sort_by(|a, b| {
        if ascending {
            a.timestamp.cmp(&b.timestamp)
        } else {
            b.timestamp.cmp(&a.timestamp)
        }
    });
}

/// Slices out one page of `items`.
///
/// Pages are 1-indexed. `total_pages` is `ceil(total / page_size)` with a
/// floor of 1; an out-of-range `page` is clamped into range rather than
/// reading out of bounds. A `page_size` of 0 is treated as 1.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(total_items);
    Page {
        items: &items[start.min(total_items)..end],
        page,
        total_pages,
        total_items,
    }
}
