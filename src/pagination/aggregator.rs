//! Eager traversal: collect every page into one in-memory result

use super::types::fetch_page;
use crate::error::Result;
use crate::http::{RequestExecutor, RequestOptions};
use crate::types::Method;
use serde_json::Value;
use tracing::debug;

/// Fetch every page of a collection, following `next` links to exhaustion.
///
/// Returns `Ok(None)` when the first response is a 204. Otherwise returns
/// the concatenation, in page order, of every page's records. Follow-up
/// requests reuse the method, headers and body unchanged; only the target
/// URL changes. Any page failure aborts the whole aggregation with that
/// page's error; partial data is never returned.
pub async fn fetch_all(
    executor: &RequestExecutor,
    method: Method,
    url: &str,
    options: RequestOptions,
) -> Result<Option<Vec<Value>>> {
    let Some(first) = fetch_page(executor, method, url, options.clone()).await? else {
        return Ok(None);
    };

    let mut records = first.records;
    let mut next = first.links.next;

    while let Some(link) = next {
        debug!(url = %link.url, "following next page link");
        match fetch_page(executor, method, &link.url, options.clone()).await? {
            Some(page) => {
                records.extend(page.records);
                next = page.links.next;
            }
            // A mid-traversal 204 carries no records and no links; treat it
            // as the end of the collection.
            None => break,
        }
    }

    Ok(Some(records))
}
