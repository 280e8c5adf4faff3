//! Listing response type definitions.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Top-level listing envelope: `{"kind": "Listing", "data": {...}}`.
#[derive(Debug, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

/// Page contents and continuation cursor.
#[derive(Debug, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<ListingChild>,
    #[serde(default)]
    pub after: Option<String>,
}

/// One child of a listing page, wrapping the post record.
#[derive(Debug, Deserialize)]
pub struct ListingChild {
    #[serde(default)]
    pub kind: Option<String>,
    pub data: RawEntry,
}

/// A post as returned by the listing endpoint.
///
/// Missing `is_self`, `is_video` and `over_18` flags default to `true`, so a
/// partial record is excluded rather than downloaded.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub subreddit: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub permalink: Option<String>,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub created_utc: f64,
    #[serde(default = "fail_closed")]
    pub over_18: bool,
    #[serde(default = "fail_closed")]
    pub is_self: bool,
    #[serde(default = "fail_closed")]
    pub is_video: bool,
    #[serde(default)]
    pub is_gallery: Option<bool>,
    #[serde(default)]
    pub gallery_data: Option<GalleryData>,
    /// Gallery media keyed by media id, in document order.
    #[serde(default)]
    pub media_metadata: Option<Map<String, Value>>,
    #[serde(default)]
    pub preview: Option<Preview>,
}

fn fail_closed() -> bool {
    true
}

/// Ordered gallery item list.
#[derive(Debug, Clone, Deserialize)]
pub struct GalleryData {
    #[serde(default)]
    pub items: Vec<GalleryItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GalleryItem {
    pub media_id: String,
}

/// One `media_metadata` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct GalleryMedia {
    #[serde(default)]
    pub status: Option<String>,
    /// Source (highest quality) rendition.
    #[serde(default)]
    pub s: Option<GallerySource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GallerySource {
    #[serde(default)]
    pub u: Option<String>,
    #[serde(default)]
    pub gif: Option<String>,
    #[serde(default)]
    pub x: Option<u32>,
    #[serde(default)]
    pub y: Option<u32>,
}

/// Rendered preview block.
#[derive(Debug, Clone, Deserialize)]
pub struct Preview {
    #[serde(default)]
    pub images: Vec<PreviewImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreviewImage {
    #[serde(default)]
    pub source: Option<PreviewSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreviewSource {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

impl RawEntry {
    /// The post's link target, empty when absent.
    pub fn link_url(&self) -> &str {
        self.url.as_deref().unwrap_or("")
    }

    pub fn is_gallery(&self) -> bool {
        self.is_gallery.unwrap_or(false)
    }

    /// Source of the first rendered preview image.
    pub fn preview_source(&self) -> Option<&PreviewSource> {
        self.preview
            .as_ref()?
            .images
            .first()?
            .source
            .as_ref()
    }

    /// Best-effort dimensions from the preview source, `(0, 0)` when unknown.
    pub fn dimensions(&self) -> (u32, u32) {
        self.preview_source()
            .map(|s| (s.width, s.height))
            .unwrap_or((0, 0))
    }

    /// First gallery item, following `gallery_data` order when present.
    pub fn first_gallery_media(&self) -> Option<GalleryMedia> {
        let metadata = self.media_metadata.as_ref()?;

        let value = match self.gallery_data.as_ref().and_then(|g| g.items.first()) {
            Some(item) => metadata.get(&item.media_id)?,
            None => metadata.values().next()?,
        };

        serde_json::from_value(value.clone()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_flags_fail_closed() {
        let entry: RawEntry = serde_json::from_value(json!({"id": "abc"})).unwrap();
        assert!(entry.is_self);
        assert!(entry.is_video);
        assert!(entry.over_18);
        assert_eq!(entry.link_url(), "");
        assert_eq!(entry.dimensions(), (0, 0));
    }

    #[test]
    fn test_listing_envelope() {
        let listing: Listing = serde_json::from_value(json!({
            "kind": "Listing",
            "data": {
                "after": "t3_next",
                "children": [
                    {"kind": "t3", "data": {"id": "a1", "score": 10, "created_utc": 1700000000.0}},
                    {"kind": "t3", "data": {"id": "a2", "score": -3}}
                ]
            }
        }))
        .unwrap();

        assert_eq!(listing.data.after.as_deref(), Some("t3_next"));
        assert_eq!(listing.data.children.len(), 2);
        assert_eq!(listing.data.children[1].data.score, -3);
    }

    #[test]
    fn test_null_cursor() {
        let listing: Listing =
            serde_json::from_value(json!({"data": {"children": [], "after": null}})).unwrap();
        assert!(listing.data.after.is_none());
    }

    #[test]
    fn test_first_gallery_media_uses_gallery_order() {
        let entry: RawEntry = serde_json::from_value(json!({
            "id": "g1",
            "is_gallery": true,
            "gallery_data": {"items": [{"media_id": "second"}, {"media_id": "first"}]},
            "media_metadata": {
                "first": {"status": "valid", "s": {"u": "https://i.redd.it/first.jpg", "x": 10, "y": 10}},
                "second": {"status": "valid", "s": {"u": "https://i.redd.it/second.jpg", "x": 20, "y": 20}}
            }
        }))
        .unwrap();

        let media = entry.first_gallery_media().unwrap();
        assert_eq!(
            media.s.unwrap().u.as_deref(),
            Some("https://i.redd.it/second.jpg")
        );
    }

    #[test]
    fn test_first_gallery_media_document_order() {
        let entry: RawEntry = serde_json::from_value(json!({
            "id": "g2",
            "is_gallery": true,
            "media_metadata": {
                "zzz": {"s": {"u": "https://i.redd.it/zzz.png"}},
                "aaa": {"s": {"u": "https://i.redd.it/aaa.png"}}
            }
        }))
        .unwrap();

        let media = entry.first_gallery_media().unwrap();
        assert_eq!(media.s.unwrap().u.as_deref(), Some("https://i.redd.it/zzz.png"));
    }

    #[test]
    fn test_preview_dimensions() {
        let entry: RawEntry = serde_json::from_value(json!({
            "id": "p1",
            "preview": {"images": [{"source": {"url": "https://preview.redd.it/x.jpg", "width": 1920, "height": 1080}}]}
        }))
        .unwrap();
        assert_eq!(entry.dimensions(), (1920, 1080));
    }
}
