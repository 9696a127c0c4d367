//! Pagination of ordered result sets
//!
//! Slicing happens after filtering and sorting; `total` therefore counts
//! every matching record, not just the returned page.

use serde::Serialize;

use crate::query::params::PageRequest;

/// The paginated response envelope returned by every list endpoint
///
/// Invariants: `count == data.len() <= limit`,
/// `page_count == ceil(total / limit)` and is zero exactly when `total`
/// is zero.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PageResult<T> {
    /// Records on this page, in sort order
    pub data: Vec<T>,

    /// Number of records on this page
    pub count: usize,

    /// Total matching records across all pages
    pub total: usize,

    /// Echoed page number
    pub page: usize,

    /// Total number of pages
    #[serde(rename = "pageCount")]
    pub page_count: usize,
}

impl<T> PageResult<T> {
    /// Map every record through a fallible conversion, keeping the
    /// pagination metadata intact
    pub fn try_map<U, E, F>(self, f: F) -> Result<PageResult<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        let data = self
            .data
            .into_iter()
            .map(f)
            .collect::<Result<Vec<U>, E>>()?;
        Ok(PageResult {
            data,
            count: self.count,
            total: self.total,
            page: self.page,
            page_count: self.page_count,
        })
    }
}

/// Slice an ordered result set into the requested page.
///
/// An offset past the end yields an empty page, not an error.
pub fn paginate<T>(records: Vec<T>, request: &PageRequest) -> PageResult<T> {
    let total = records.len();
    let limit = request.limit();
    let page_count = if total == 0 { 0 } else { total.div_ceil(limit) };

    let data: Vec<T> = records
        .into_iter()
        .skip(request.offset())
        .take(limit)
        .collect();

    PageResult {
        count: data.len(),
        data,
        total,
        page: request.page(),
        page_count,
    }
}
