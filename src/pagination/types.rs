//! Page and progress types for paginated traversals

use super::links::LinkSet;
use crate::error::Result;
use crate::http::{Decoded, RequestExecutor, RequestOptions};
use crate::types::Method;
use serde_json::Value;

/// One page of a paginated collection
#[derive(Debug, Clone)]
pub struct Page {
    /// Records in server order
    pub records: Vec<Value>,
    /// Pagination links from the response headers
    pub links: LinkSet,
}

impl Page {
    /// Build a page from a decoded JSON body and its link set.
    ///
    /// An array body becomes the page's records in order; any other JSON
    /// value is treated as a single-record page.
    pub fn new(body: Value, links: LinkSet) -> Self {
        let records = match body {
            Value::Array(items) => items,
            other => vec![other],
        };
        Self { records, links }
    }
}

/// Fetch and decode one page.
///
/// Returns `None` when the server answers 204 (no content, no records).
pub(crate) async fn fetch_page(
    executor: &RequestExecutor,
    method: Method,
    url: &str,
    options: RequestOptions,
) -> Result<Option<Page>> {
    let envelope = executor.execute(method, url, options).await?;
    let links = envelope.links();
    match envelope.decode()? {
        Decoded::NoContent => Ok(None),
        Decoded::Json(body) => Ok(Some(Page::new(body, links))),
    }
}

/// Running position within a streamed traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based count of records emitted so far, across all pages
    pub current: u64,
    /// Estimated total record count (`last.page × last.per_page`), fixed the
    /// first time a usable `last` link is observed; `None` until then
    pub total: Option<u64>,
}

/// One streamed record together with traversal progress
#[derive(Debug, Clone, PartialEq)]
pub struct RecordEnvelope {
    /// The record as returned by the server
    pub data: Value,
    /// Position of this record within the traversal
    pub progress: Progress,
}
