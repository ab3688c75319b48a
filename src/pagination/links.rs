//! Link header parsing (RFC 5988 subset)
//!
//! The Lexio API carries its pagination cursor in the `Link` response header
//! as comma-separated `<url>; rel="name"` segments. Only the
//! `first`/`prev`/`next`/`last` relations are recognized; everything else is
//! ignored. A missing or empty header maps to an empty [`LinkSet`], and a
//! malformed numeric field degrades to `None` rather than failing the parse.

use reqwest::header::HeaderMap;
use url::Url;

/// One pagination link: target URL plus page coordinates when present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    /// Absolute URL of the linked page
    pub url: String,
    /// `page` query parameter, when it parses as an integer
    pub page: Option<u32>,
    /// `per_page` query parameter, when it parses as an integer
    pub per_page: Option<u32>,
}

impl PageLink {
    fn from_url(url: &str) -> Self {
        let (page, per_page) = match Url::parse(url) {
            Ok(parsed) => {
                let query_int = |name: &str| {
                    parsed
                        .query_pairs()
                        .find(|(k, _)| k == name)
                        .and_then(|(_, v)| v.parse::<u32>().ok())
                };
                (query_int("page"), query_int("per_page"))
            }
            Err(_) => (None, None),
        };

        Self {
            url: url.to_string(),
            page,
            per_page,
        }
    }
}

/// Structured decoding of the `Link` response header
///
/// Invariant: `next` is present if and only if more pages remain; its absence
/// is the sole terminal condition for a paginated traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSet {
    /// First page of the collection
    pub first: Option<PageLink>,
    /// Previous page
    pub prev: Option<PageLink>,
    /// Next page
    pub next: Option<PageLink>,
    /// Last page of the collection
    pub last: Option<PageLink>,
}

impl LinkSet {
    /// Parse a raw `Link` header value
    pub fn parse(header: &str) -> Self {
        let mut links = Self::default();

        for part in header.split(',') {
            let part = part.trim();
            let mut url = None;
            let mut rel = None;

            for segment in part.split(';') {
                let segment = segment.trim();
                if segment.starts_with('<') && segment.ends_with('>') {
                    url = Some(&segment[1..segment.len() - 1]);
                } else if let Some(stripped) = segment.strip_prefix("rel=") {
                    rel = Some(stripped.trim_matches('"').trim_matches('\''));
                }
            }

            let (Some(url), Some(rel)) = (url, rel) else {
                continue;
            };
            let link = PageLink::from_url(url);

            if rel.eq_ignore_ascii_case("first") {
                links.first = Some(link);
            } else if rel.eq_ignore_ascii_case("prev") {
                links.prev = Some(link);
            } else if rel.eq_ignore_ascii_case("next") {
                links.next = Some(link);
            } else if rel.eq_ignore_ascii_case("last") {
                links.last = Some(link);
            }
        }

        links
    }

    /// Parse the `Link` header out of a response header map
    ///
    /// An absent header yields an empty set.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get("link")
            .and_then(|v| v.to_str().ok())
            .map(Self::parse)
            .unwrap_or_default()
    }

    /// True when no relation was recognized
    pub fn is_empty(&self) -> bool {
        self.first.is_none() && self.prev.is_none() && self.next.is_none() && self.last.is_none()
    }

    /// True when more pages remain
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Estimated total record count, from the `last` link's coordinates
    ///
    /// `None` unless the `last` link carries both `page` and `per_page`. An
    /// estimate only: the true size of the final page is unknown until it is
    /// fetched.
    pub fn estimated_total(&self) -> Option<u64> {
        let last = self.last.as_ref()?;
        Some(u64::from(last.page?) * u64::from(last.per_page?))
    }
}
