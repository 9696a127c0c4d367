//! The query-processing pipeline
//!
//! Turns untyped, string-encoded filter/sort/pagination parameters into
//! a schema-aware query against the store and returns a paginated
//! result. Every entity repository goes through the same
//! [`process_query`] entry point:
//!
//! 1. [`filter`] decodes the encoded condition strings,
//! 2. [`predicate`] coerces values via [`coerce`] and compiles the
//!    conditions into an AND-composed predicate,
//! 3. the store executes a single scan and returns the matching set,
//! 4. [`sort`] orders the full result set in memory (the store cannot
//!    sort arbitrary fields during a scan),
//! 5. [`page`] slices the ordered set into the requested page.
//!
//! Because the store is scan-oriented, every query reads the entity's
//! whole collection. That is a structural ceiling, not a bug: beyond
//! roughly ten thousand records per entity this pipeline needs to be
//! replaced by secondary indexes or an external search index. The
//! configured `max_scan_size` makes the ceiling explicit instead of
//! letting large collections degrade silently.

pub mod coerce;
pub mod filter;
pub mod page;
pub mod params;
pub mod predicate;
pub mod schema;
pub mod sort;

pub use coerce::FieldValue;
pub use filter::{Condition, FilterOp};
pub use page::{PageResult, paginate};
pub use params::{ListParams, PageRequest, SortDirection, SortSpec};
pub use predicate::{CompiledCondition, CompiledTest};
pub use schema::{FieldKind, FieldTypeMap};

use serde_json::Value;

use crate::core::error::{ChanceryError, QueryError};
use crate::storage::Store;

/// Run the full pipeline for one request.
///
/// A single synchronous read: the scan is issued once and consumed
/// entirely before sorting. There are no retries and no partial results;
/// any store failure aborts the query.
pub async fn process_query<S>(
    store: &S,
    filters: &[String],
    types: &FieldTypeMap,
    sort_spec: &SortSpec,
    request: &PageRequest,
    max_scan_size: usize,
) -> Result<PageResult<Value>, ChanceryError>
where
    S: Store + ?Sized,
{
    let conditions = filter::parse_conditions(filters);
    let compiled = predicate::compile(&conditions, types)?;

    let mut records = store.scan(&compiled).await?;
    if records.len() > max_scan_size {
        return Err(QueryError::ScanLimitExceeded {
            matched: records.len(),
            max: max_scan_size,
        }
        .into());
    }
    tracing::debug!(
        matched = records.len(),
        conditions = compiled.len(),
        sort_field = %sort_spec.field,
        "scan complete"
    );

    sort::sort_records(&mut records, sort_spec);
    Ok(page::paginate(records, request))
}
