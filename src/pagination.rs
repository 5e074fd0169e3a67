//! Walks paginated feature collections by following `next` links.

use std::collections::HashSet;

use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::links::{find_link_by_rel, media_type, rel};

/// Upper bound on fetched pages before the walk is treated as cyclic.
pub const DEFAULT_MAX_PAGES: usize = 100;

/// Follows the chain of `next` relation links from an initial result page,
/// accumulating the number of returned features.
///
/// The walk is strictly serial: each request depends on the link returned by
/// the previous response, so exactly one request is in flight at a time.
/// Transport configuration (TLS, auth, timeouts) is the caller's concern via
/// the supplied [`reqwest::Client`].
pub struct PaginationWalker {
    client: reqwest::Client,
    max_pages: usize,
}

impl PaginationWalker {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Overrides the page cap ([`DEFAULT_MAX_PAGES`] by default). The cap
    /// counts all pages including the initial one.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Counts all features reachable from the initial page by following
    /// `next` links.
    ///
    /// Query parameters of each `next` href are preserved verbatim; when
    /// `limit_override` is positive it replaces any `limit` parameter. Pages
    /// are requested with `Accept: application/geo+json` and must answer with
    /// a success status; anything else is a hard failure, not retried.
    ///
    /// The walk ends when a page carries no `next` link or returns an empty
    /// `features` array (even if a further `next` link is present). A
    /// revisited URL or more than the configured number of pages is reported
    /// as [`Error::PaginationLoop`], since the server is expected to
    /// eventually terminate the chain.
    pub async fn count_all_features(
        &self,
        initial_page: &Value,
        limit_override: Option<u32>,
    ) -> Result<u64> {
        let mut total = feature_count(initial_page);
        let mut visited = HashSet::new();
        let mut pages = 1usize;
        let mut next = next_href(initial_page).map(str::to_string);

        while let Some(href) = next {
            if pages >= self.max_pages || !visited.insert(href.clone()) {
                return Err(Error::PaginationLoop { pages });
            }
            let url = rebuild_page_url(&href, limit_override)?;
            debug!(url = %url, "fetching next page");

            let response = self
                .client
                .get(url.clone())
                .header(ACCEPT, media_type::GEOJSON)
                .send()
                .await?;
            let status = response.status();
            if !status.is_success() {
                return Err(Error::UnexpectedStatus {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }
            let page: Value = response.json().await?;

            let count = feature_count(&page);
            total += count;
            pages += 1;
            // An empty page ends the stream even when a next link remains.
            next = if count == 0 {
                None
            } else {
                next_href(&page).map(str::to_string)
            };
        }

        debug!(total, pages, "pagination walk finished");
        Ok(total)
    }
}

fn feature_count(page: &Value) -> u64 {
    page.get("features")
        .and_then(Value::as_array)
        .map(|features| features.len() as u64)
        .unwrap_or(0)
}

fn next_href(page: &Value) -> Option<&str> {
    let links = page.get("links")?.as_array()?;
    find_link_by_rel(links, rel::NEXT)?
        .get("href")?
        .as_str()
}

/// Rebuilds a `next` href, keeping its query parameters as-is and replacing
/// `limit` when an override is given.
fn rebuild_page_url(href: &str, limit_override: Option<u32>) -> Result<Url> {
    let mut url = Url::parse(href)?;
    if let Some(limit) = limit_override.filter(|limit| *limit > 0) {
        let preserved: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != "limit")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(preserved)
            .append_pair("limit", &limit.to_string());
    }
    Ok(url)
}
