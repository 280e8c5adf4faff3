//! Download candidate representation.

use chrono::{DateTime, Utc};

use crate::api::types::RawEntry;
use crate::fs::naming::derive_filename;

/// A post that passed resolution and filtering and is queued for download.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Stable upstream identifier.
    pub id: String,
    pub title: String,
    pub author: String,
    /// Collection the post belongs to.
    pub collection: String,
    /// Resolved asset URL. Never empty.
    pub asset_url: String,
    pub permalink: String,
    pub score: i64,
    /// Creation time in epoch seconds.
    pub created_utc: i64,
    pub is_nsfw: bool,
    /// Width in pixels, 0 when unknown.
    pub width: u32,
    /// Height in pixels, 0 when unknown.
    pub height: u32,
}

impl Candidate {
    /// Build a candidate from an entry and its resolved asset URL.
    ///
    /// Returns `None` when the URL or the identifier is empty.
    pub fn from_entry(entry: &RawEntry, asset_url: String, collection: &str) -> Option<Self> {
        if asset_url.is_empty() || entry.id.is_empty() {
            return None;
        }

        let (width, height) = entry.dimensions();

        Some(Self {
            id: entry.id.clone(),
            title: entry.title.clone().unwrap_or_else(|| "Untitled".to_string()),
            author: entry.author.clone().unwrap_or_else(|| "unknown".to_string()),
            collection: entry
                .subreddit
                .clone()
                .unwrap_or_else(|| collection.to_string()),
            asset_url,
            permalink: entry.permalink.clone().unwrap_or_default(),
            score: entry.score,
            created_utc: entry.created_utc as i64,
            is_nsfw: entry.over_18,
            width,
            height,
        })
    }

    /// Filename this candidate is stored under.
    pub fn filename(&self) -> String {
        derive_filename(&self.id, &self.title, &self.asset_url)
    }

    /// Creation time, if the timestamp is representable.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_utc, 0)
    }
}
