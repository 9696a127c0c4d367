//! Query parameters for pagination, sorting and filtering
//!
//! This structure is extracted from URL query strings by the hosting
//! controller (e.g. through axum's `Query` extractor). All parameters
//! have the defaults the public API documents.

use serde::Deserialize;

/// Query parameters accepted by every list endpoint
///
/// # Format
/// - `page` — positive integer, default 1
/// - `limit` — positive integer, default 10
/// - `sort` — `"<field>,<ASC|DESC>"`, default `"id,DESC"`
/// - `filter` — zero or more `"<field>||<operator>||<value>"` strings,
///   AND-combined
///
/// # Example
/// ```text
/// GET /orders?page=2&limit=25&sort=created_at,ASC&filter=status||eq||1
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListParams {
    /// Page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Sort field and direction
    pub sort: String,

    /// Encoded filter conditions
    pub filter: Vec<String>,
}

fn default_page() -> usize {
    1
}

fn default_limit() -> usize {
    10
}

fn default_sort() -> String {
    "id,DESC".to_string()
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
            sort: default_sort(),
            filter: Vec::new(),
        }
    }
}

impl ListParams {
    /// Parse the sort parameter into a [`SortSpec`]
    pub fn sort_spec(&self) -> SortSpec {
        SortSpec::parse(&self.sort)
    }

    /// Clamped page request for the paginator
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A parsed single-field sort specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Parse `"<field>,<ASC|DESC>"`.
    ///
    /// A bare field name sorts ascending; an explicit direction other
    /// than a case-insensitive `ASC` sorts descending. An empty field
    /// falls back to `id`.
    pub fn parse(raw: &str) -> Self {
        let (field, direction) = match raw.split_once(',') {
            Some((field, direction)) => {
                let direction = if direction.trim().eq_ignore_ascii_case("asc") {
                    SortDirection::Ascending
                } else {
                    SortDirection::Descending
                };
                (field.trim(), direction)
            }
            None => (raw.trim(), SortDirection::Ascending),
        };

        let field = if field.is_empty() { "id" } else { field };
        Self {
            field: field.to_string(),
            direction,
        }
    }
}

/// A page request with both inputs clamped to at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    limit: usize,
}

impl PageRequest {
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Zero-based offset of the first record on this page
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = ListParams::default();
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 10);
        assert_eq!(params.sort, "id,DESC");
        assert!(params.filter.is_empty());
    }

    #[test]
    fn test_default_sort_spec() {
        let spec = ListParams::default().sort_spec();
        assert_eq!(spec.field, "id");
        assert_eq!(spec.direction, SortDirection::Descending);
    }

    #[test]
    fn test_sort_parse_directions() {
        assert_eq!(
            SortSpec::parse("name,ASC").direction,
            SortDirection::Ascending
        );
        assert_eq!(
            SortSpec::parse("name,asc").direction,
            SortDirection::Ascending
        );
        assert_eq!(
            SortSpec::parse("name,DESC").direction,
            SortDirection::Descending
        );
        // Unknown direction tokens sort descending
        assert_eq!(
            SortSpec::parse("name,sideways").direction,
            SortDirection::Descending
        );
    }

    #[test]
    fn test_bare_field_sorts_ascending() {
        let spec = SortSpec::parse("created_at");
        assert_eq!(spec.field, "created_at");
        assert_eq!(spec.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_empty_sort_falls_back_to_id() {
        let spec = SortSpec::parse("");
        assert_eq!(spec.field, "id");
        assert_eq!(spec.direction, SortDirection::Ascending);

        let spec = SortSpec::parse(",DESC");
        assert_eq!(spec.field, "id");
        assert_eq!(spec.direction, SortDirection::Descending);
    }

    #[test]
    fn test_page_request_clamps() {
        let request = PageRequest::new(0, 0);
        assert_eq!(request.page(), 1);
        assert_eq!(request.limit(), 1);
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn test_page_request_offset() {
        let request = PageRequest::new(3, 10);
        assert_eq!(request.offset(), 20);
    }

    #[test]
    fn test_deserialize_from_query_shape() {
        let params: ListParams = serde_json::from_value(serde_json::json!({
            "page": 2,
            "limit": 5,
            "sort": "amount,ASC",
            "filter": ["status||eq||1"]
        }))
        .expect("params should deserialize");
        assert_eq!(params.page, 2);
        assert_eq!(params.limit, 5);
        assert_eq!(params.filter.len(), 1);
    }
}
