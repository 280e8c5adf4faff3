//! Listing endpoint HTTP client.

use std::time::Duration;

use rand::Rng;
use reqwest::{header, Client, StatusCode};
use tokio::time::sleep;

use crate::api::query::{ListingQuery, MAX_PAGE_SIZE};
use crate::api::types::{Listing, RawEntry};
use crate::config::NetworkConfig;
use crate::error::{Error, Result};

/// Retries after a 429 before the error is propagated.
pub const MAX_RATE_LIMIT_RETRIES: u32 = 1;

/// One page of a listing.
#[derive(Debug)]
pub struct ListingPage {
    pub entries: Vec<RawEntry>,
    /// Continuation cursor, `None` at the end of the listing.
    pub after: Option<String>,
}

/// What the caller decided about one entry during [`RedditApi::fetch_until`].
#[derive(Debug)]
pub enum Selection<T> {
    /// Keep the item; counts toward the target.
    Keep(T),
    /// Qualifies but is already known; counted as skipped.
    Skip,
    /// Does not qualify.
    Reject,
}

/// Result of a paginated fetch. Always carries whatever was collected.
#[derive(Debug)]
pub struct ListingOutcome<T> {
    pub items: Vec<T>,
    pub skipped: usize,
    pub pages: usize,
    /// Error that ended pagination early, if any.
    pub error: Option<Error>,
}

impl<T> Default for ListingOutcome<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            skipped: 0,
            pages: 0,
            error: None,
        }
    }
}

/// Client for the public listing endpoint.
pub struct RedditApi {
    client: Client,
    base_url: String,
    request_delay: Duration,
    request_jitter_ms: u64,
    rate_limit_cooldown: Duration,
}

impl RedditApi {
    /// Create a new listing client.
    pub fn new(network: &NetworkConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&network.user_agent)
            .timeout(network.timeout())
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: network.base_url.clone(),
            request_delay: Duration::from_millis(network.request_delay_ms),
            request_jitter_ms: network.request_jitter_ms,
            rate_limit_cooldown: network.rate_limit_cooldown(),
        })
    }

    /// Fetch a single listing page.
    pub async fn fetch(&self, query: &ListingQuery) -> Result<ListingPage> {
        let url = query.to_url(&self.base_url)?;

        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .header(header::ACCEPT, "application/json")
            .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| Error::TransientNetwork(e.to_string()))?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited(self.rate_limit_cooldown.as_secs()));
        }

        if !status.is_success() {
            return Err(Error::Upstream {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| Error::TransientNetwork(e.to_string()))?;

        let listing: Listing = serde_json::from_str(&text).map_err(|e| {
            let excerpt: String = text.chars().take(200).collect();
            Error::MalformedResponse(format!("{} - Response: {}", e, excerpt))
        })?;

        Ok(ListingPage {
            entries: listing.data.children.into_iter().map(|c| c.data).collect(),
            after: listing.data.after.filter(|a| !a.is_empty()),
        })
    }

    /// Fetch a page, retrying once after a cooldown if rate limited.
    pub async fn fetch_with_retry(&self, query: &ListingQuery) -> Result<ListingPage> {
        let mut attempt = 0;
        loop {
            match self.fetch(query).await {
                Err(e) if e.is_rate_limited() && attempt < MAX_RATE_LIMIT_RETRIES => {
                    attempt += 1;
                    tracing::warn!(
                        "Rate limited, waiting {} seconds before retrying...",
                        self.rate_limit_cooldown.as_secs()
                    );
                    sleep(self.rate_limit_cooldown).await;
                }
                result => return result,
            }
        }
    }

    /// Page through a listing until `target` items are kept.
    ///
    /// Each entry is passed to `select` in listing order. Pagination stops when
    /// the target is reached, a page is empty, no cursor is returned, or a
    /// request fails. Items gathered before a failure are returned alongside it.
    pub async fn fetch_until<T, F>(
        &self,
        base: &ListingQuery,
        target: usize,
        mut select: F,
    ) -> ListingOutcome<T>
    where
        F: FnMut(RawEntry) -> Selection<T>,
    {
        let mut outcome = ListingOutcome::default();
        let mut after: Option<String> = None;

        while outcome.items.len() < target {
            let remaining = target - outcome.items.len();
            let query = base.page(remaining.min(MAX_PAGE_SIZE), after.take());

            tracing::info!(
                "Requesting page {} of r/{} ({} of {} wanted)",
                outcome.pages + 1,
                query.collection(),
                query.limit(),
                remaining
            );

            let page = match self.fetch_with_retry(&query).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!("Listing fetch stopped early: {}", e);
                    outcome.error = Some(e);
                    break;
                }
            };
            outcome.pages += 1;

            if page.entries.is_empty() {
                tracing::debug!("Empty page, listing exhausted");
                break;
            }

            for entry in page.entries {
                if outcome.items.len() >= target {
                    break;
                }
                match select(entry) {
                    Selection::Keep(item) => outcome.items.push(item),
                    Selection::Skip => outcome.skipped += 1,
                    Selection::Reject => {}
                }
            }

            match page.after {
                Some(cursor) if outcome.items.len() < target => after = Some(cursor),
                _ => break,
            }

            self.pause().await;
        }

        outcome
    }

    /// Politeness delay between listing pages.
    async fn pause(&self) {
        let jitter = if self.request_jitter_ms > 0 {
            rand::thread_rng().gen_range(0..=self.request_jitter_ms)
        } else {
            0
        };
        let delay = self.request_delay + Duration::from_millis(jitter);
        if !delay.is_zero() {
            sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SortMode, TimeWindow};
    use serde_json::{json, Value};
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_api(server: &MockServer) -> RedditApi {
        let network = NetworkConfig {
            base_url: server.uri(),
            request_delay_ms: 0,
            rate_limit_cooldown_secs: 0,
            timeout_secs: 5,
            ..Default::default()
        };
        RedditApi::new(&network).unwrap()
    }

    fn listing(ids: &[&str], after: Option<&str>) -> Value {
        let children: Vec<Value> = ids
            .iter()
            .map(|id| json!({"kind": "t3", "data": {"id": id, "is_self": false, "is_video": false, "over_18": false}}))
            .collect();
        json!({"kind": "Listing", "data": {"children": children, "after": after}})
    }

    fn keep_all(entry: RawEntry) -> Selection<String> {
        Selection::Keep(entry.id)
    }

    fn base_query() -> ListingQuery {
        ListingQuery::new("pics", SortMode::Hot, TimeWindow::Week)
    }

    #[tokio::test]
    async fn test_fetch_parses_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/r/pics/hot.json"))
            .and(query_param("raw_json", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(&["a", "b"], Some("t3_b"))))
            .mount(&server)
            .await;

        let api = test_api(&server);
        let page = api.fetch(&base_query().page(2, None)).await.unwrap();
        assert_eq!(page.entries.len(), 2);
        assert_eq!(page.after.as_deref(), Some("t3_b"));
    }

    #[tokio::test]
    async fn test_fetch_classifies_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/r/broken/hot.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/r/private/hot.json"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let api = test_api(&server);

        let broken = ListingQuery::new("broken", SortMode::Hot, TimeWindow::Week);
        assert!(matches!(
            api.fetch(&broken).await,
            Err(Error::MalformedResponse(_))
        ));

        let private = ListingQuery::new("private", SortMode::Hot, TimeWindow::Week);
        assert!(matches!(
            api.fetch(&private).await,
            Err(Error::Upstream { status: 403, .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_is_transient() {
        let network = NetworkConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_secs: 2,
            ..Default::default()
        };
        let api = RedditApi::new(&network).unwrap();
        let err = api.fetch(&base_query()).await.unwrap_err();
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_fetch_until_stops_at_target() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/r/pics/hot.json"))
            .and(query_param_is_missing("after"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(&["a", "b", "c"], Some("t3_c"))))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/r/pics/hot.json"))
            .and(query_param("after", "t3_c"))
            .and(query_param("limit", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(&["d", "e", "f"], None)))
            .expect(1)
            .mount(&server)
            .await;

        let api = test_api(&server);
        let outcome = api.fetch_until(&base_query(), 5, keep_all).await;

        assert_eq!(outcome.items, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(outcome.pages, 2);
        assert!(outcome.error.is_none());
    }

    #[tokio::test]
    async fn test_pages_are_spaced_by_request_delay() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/r/pics/hot.json"))
            .and(query_param_is_missing("after"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(&["a"], Some("t3_a"))))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/r/pics/hot.json"))
            .and(query_param("after", "t3_a"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(&["b"], None)))
            .expect(1)
            .mount(&server)
            .await;

        let api = RedditApi::new(&NetworkConfig {
            base_url: server.uri(),
            request_delay_ms: 150,
            timeout_secs: 5,
            ..Default::default()
        })
        .unwrap();

        let started = std::time::Instant::now();
        let outcome = api.fetch_until(&base_query(), 2, keep_all).await;

        assert_eq!(outcome.items, vec!["a", "b"]);
        assert_eq!(outcome.pages, 2);
        assert!(started.elapsed() >= Duration::from_millis(150));
    }

    #[tokio::test]
    async fn test_no_delay_after_last_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/r/pics/hot.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(&["a"], None)))
            .expect(1)
            .mount(&server)
            .await;

        let api = RedditApi::new(&NetworkConfig {
            base_url: server.uri(),
            request_delay_ms: 10_000,
            timeout_secs: 5,
            ..Default::default()
        })
        .unwrap();

        let started = std::time::Instant::now();
        let outcome = api.fetch_until(&base_query(), 5, keep_all).await;

        assert_eq!(outcome.items, vec!["a"]);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_fetch_until_stops_without_cursor() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/r/pics/hot.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(&["a", "b"], None)))
            .expect(1)
            .mount(&server)
            .await;

        let api = test_api(&server);
        let outcome = api.fetch_until(&base_query(), 50, keep_all).await;
        assert_eq!(outcome.items, vec!["a", "b"]);
        assert_eq!(outcome.pages, 1);
    }

    #[tokio::test]
    async fn test_fetch_until_counts_skips_and_rejects() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/r/pics/hot.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(&["a", "b", "c", "d"], None)))
            .mount(&server)
            .await;

        let api = test_api(&server);
        let outcome = api
            .fetch_until(&base_query(), 10, |entry| match entry.id.as_str() {
                "a" => Selection::Skip,
                "b" => Selection::Reject,
                _ => Selection::Keep(entry.id),
            })
            .await;

        assert_eq!(outcome.items, vec!["c", "d"]);
        assert_eq!(outcome.skipped, 1);
    }

    #[tokio::test]
    async fn test_rate_limit_retried_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/r/pics/hot.json"))
            .respond_with(ResponseTemplate::new(429))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/r/pics/hot.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(&["a", "b"], None)))
            .expect(1)
            .mount(&server)
            .await;

        let api = test_api(&server);
        let outcome = api.fetch_until(&base_query(), 5, keep_all).await;
        assert_eq!(outcome.items, vec!["a", "b"]);
        assert!(outcome.error.is_none());
    }

    #[tokio::test]
    async fn test_second_rate_limit_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/r/pics/hot.json"))
            .respond_with(ResponseTemplate::new(429))
            .expect(2)
            .mount(&server)
            .await;

        let api = test_api(&server);
        let outcome = api.fetch_until(&base_query(), 5, keep_all).await;
        assert!(outcome.items.is_empty());
        assert_eq!(outcome.pages, 0);
        assert!(matches!(outcome.error, Some(Error::RateLimited(_))));
    }

    #[tokio::test]
    async fn test_partial_results_survive_later_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/r/pics/hot.json"))
            .and(query_param_is_missing("after"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(&["a", "b"], Some("t3_b"))))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/r/pics/hot.json"))
            .and(query_param("after", "t3_b"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let api = test_api(&server);
        let outcome = api.fetch_until(&base_query(), 10, keep_all).await;
        assert_eq!(outcome.items, vec!["a", "b"]);
        assert!(matches!(
            outcome.error,
            Some(Error::Upstream { status: 500, .. })
        ));
    }
}
