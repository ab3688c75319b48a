//! Lazy traversal: a pull-based stream of records with progress
//!
//! [`RecordStream`] walks the same `next`-link chain as the aggregator but
//! emits records one at a time under consumer demand. At most one fetch is
//! ever in flight: demand arriving while a page request is outstanding is
//! coalesced onto that request, never duplicated. Page N+1 is not requested
//! before page N has fully resolved and drained.

use super::links::LinkSet;
use super::types::{fetch_page, Page, Progress, RecordEnvelope};
use crate::error::Result;
use crate::http::{RequestExecutor, RequestOptions};
use crate::types::Method;
use futures::future::BoxFuture;
use futures::Stream;
use serde_json::Value;
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tracing::debug;
use url::Url;

type PageFuture = BoxFuture<'static, Result<Option<Page>>>;

enum StreamState {
    /// No request issued yet
    Start,
    /// One page request in flight
    Fetching(PageFuture),
    /// Draining the current page; `next_url` is where to go afterwards
    Emitting {
        records: VecDeque<Value>,
        next_url: Option<String>,
    },
    /// Exhausted or terminated by an error; yields nothing further
    Done,
}

/// A finite, non-restartable stream of [`RecordEnvelope`]s.
///
/// On a fetch failure the stream yields one final `Err` item and then ends;
/// it does not retry (that is the executor's job) and does not resume. A 204
/// first response produces an immediately exhausted stream. Early
/// termination therefore means the collection was *not* fully read.
pub struct RecordStream {
    executor: Arc<RequestExecutor>,
    method: Method,
    options: RequestOptions,
    start: Url,
    keep_initial_path: bool,
    current: u64,
    total: Option<u64>,
    state: StreamState,
}

impl RecordStream {
    /// Open a streamed traversal starting at `url`.
    ///
    /// No request is issued until the stream is first polled. The options
    /// (method, headers, body, query) are reused unchanged for every page.
    pub fn open(
        executor: Arc<RequestExecutor>,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<Self> {
        let start = executor.resolve(url)?;
        Ok(Self {
            executor,
            method,
            options,
            start,
            keep_initial_path: false,
            current: 0,
            total: None,
            state: StreamState::Start,
        })
    }

    /// Rewrite every `next` link's path back to the starting path, keeping
    /// its query string.
    ///
    /// Workaround for servers whose `next` links point at a different path
    /// than the one the traversal started on. Opt-in because it would mask
    /// legitimate path changes on a well-behaved server.
    #[must_use]
    pub fn keep_initial_path(mut self) -> Self {
        self.keep_initial_path = true;
        self
    }

    /// Count of records emitted so far
    pub fn emitted(&self) -> u64 {
        self.current
    }

    fn start_fetch(&self, url: String) -> PageFuture {
        let executor = Arc::clone(&self.executor);
        let method = self.method;
        let options = self.options.clone();
        Box::pin(async move { fetch_page(&executor, method, &url, options).await })
    }
}

/// Compute the URL of the page after this one, applying the initial-path
/// rewrite when requested.
fn next_page_url(links: &LinkSet, keep_initial_path: bool, start: &Url) -> Option<String> {
    let next = links.next.as_ref()?;
    if !keep_initial_path {
        return Some(next.url.clone());
    }
    match Url::parse(&next.url) {
        Ok(mut url) => {
            url.set_path(start.path());
            Some(url.to_string())
        }
        // An unparseable next URL is followed as-is and left to the
        // executor to reject.
        Err(_) => Some(next.url.clone()),
    }
}

impl Stream for RecordStream {
    type Item = Result<RecordEnvelope>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            match &mut this.state {
                StreamState::Done => return Poll::Ready(None),

                StreamState::Start => {
                    let url = this.start.to_string();
                    debug!(url = %url, "starting paginated stream");
                    let fut = this.start_fetch(url);
                    this.state = StreamState::Fetching(fut);
                }

                StreamState::Fetching(fut) => {
                    let result = match fut.as_mut().poll(cx) {
                        Poll::Pending => return Poll::Pending,
                        Poll::Ready(result) => result,
                    };
                    match result {
                        Err(e) => {
                            this.state = StreamState::Done;
                            return Poll::Ready(Some(Err(e)));
                        }
                        Ok(None) => {
                            this.state = StreamState::Done;
                            return Poll::Ready(None);
                        }
                        Ok(Some(page)) => {
                            // The estimate sticks to the first observed
                            // `last` link; later pages may report stale
                            // coordinates.
                            if this.total.is_none() {
                                this.total = page.links.estimated_total();
                            }
                            let next_url =
                                next_page_url(&page.links, this.keep_initial_path, &this.start);
                            this.state = StreamState::Emitting {
                                records: page.records.into(),
                                next_url,
                            };
                        }
                    }
                }

                StreamState::Emitting { records, next_url } => {
                    if let Some(data) = records.pop_front() {
                        this.current += 1;
                        return Poll::Ready(Some(Ok(RecordEnvelope {
                            data,
                            progress: Progress {
                                current: this.current,
                                total: this.total,
                            },
                        })));
                    }
                    let next = next_url.take();
                    match next {
                        Some(url) => {
                            debug!(url = %url, "following next page link");
                            let fut = this.start_fetch(url);
                            this.state = StreamState::Fetching(fut);
                        }
                        None => this.state = StreamState::Done,
                    }
                }
            }
        }
    }
}

impl std::fmt::Debug for RecordStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStream")
            .field("start", &self.start.as_str())
            .field("current", &self.current)
            .field("total", &self.total)
            .finish_non_exhaustive()
    }
}
