//! Listing request descriptor.

use url::Url;

use crate::config::{SortMode, TimeWindow};
use crate::error::Result;

/// Maximum number of entries the listing endpoint returns per page.
pub const MAX_PAGE_SIZE: usize = 100;

/// One listing page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    collection: String,
    sort: SortMode,
    time_window: TimeWindow,
    limit: usize,
    after: Option<String>,
}

impl ListingQuery {
    /// First-page query with the maximum page size.
    pub fn new(collection: impl Into<String>, sort: SortMode, time_window: TimeWindow) -> Self {
        Self {
            collection: collection.into(),
            sort,
            time_window,
            limit: MAX_PAGE_SIZE,
            after: None,
        }
    }

    /// Derive the query for a page, capping the size to `1..=MAX_PAGE_SIZE`.
    pub fn page(&self, limit: usize, after: Option<String>) -> Self {
        Self {
            collection: self.collection.clone(),
            sort: self.sort,
            time_window: self.time_window,
            limit: limit.clamp(1, MAX_PAGE_SIZE),
            after,
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Build `<base>/r/<collection>/<sort>.json?limit=..&raw_json=1[&t=..][&after=..]`.
    pub fn to_url(&self, base_url: &str) -> Result<Url> {
        let base = Url::parse(base_url)?;
        let mut url = base.join(&format!("/r/{}/{}.json", self.collection, self.sort))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("limit", &self.limit.to_string());
            pairs.append_pair("raw_json", "1");
            if self.sort.uses_time_window() {
                pairs.append_pair("t", self.time_window.as_str());
            }
            if let Some(after) = &self.after {
                pairs.append_pair("after", after);
            }
        }

        Ok(url)
    }
}
