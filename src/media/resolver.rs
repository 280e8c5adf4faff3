//! Asset URL resolution for listing entries.
//!
//! Entries come in several shapes. [`classify`] decides which one an entry is,
//! trying the strategies in order and stopping at the first match:
//!
//! 1. the link itself points at an image host or ends in an image extension
//! 2. a gallery, resolved to its first item's source rendition
//! 3. a rendered preview image
//! 4. a bare image-sharing page, resolved by appending `.jpg`
//!
//! Anything else is unresolvable. Resolution never performs I/O.

use url::Url;

use crate::api::types::RawEntry;

/// Hosts that serve images directly.
pub const IMAGE_HOSTS: &[&str] = &[
    "i.redd.it",
    "i.imgur.com",
    "imgur.com",
    "preview.redd.it",
    "external-preview.redd.it",
];

/// Path suffixes recognised as images.
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp"];

/// Image-sharing service whose pages can be turned into direct links.
const SHARING_HOST: &str = "imgur.com";

/// What an entry looks like, from the downloader's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostShape {
    /// Text-only post.
    SelfText,
    /// Hosted video.
    Video,
    /// Link straight to an image.
    DirectLink(String),
    /// Multi-image gallery, carrying the first item's source URL.
    Gallery(String),
    /// Link to a page with a rendered preview image.
    PreviewOnly(String),
    /// Image-sharing page with an inferred direct link.
    InferredLink(String),
    /// Nothing downloadable.
    Unresolvable,
}

impl PostShape {
    /// The asset URL this shape resolves to, if any.
    pub fn asset_url(&self) -> Option<&str> {
        match self {
            PostShape::DirectLink(url)
            | PostShape::Gallery(url)
            | PostShape::PreviewOnly(url)
            | PostShape::InferredLink(url) => Some(url),
            PostShape::SelfText | PostShape::Video | PostShape::Unresolvable => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PostShape::SelfText => "self",
            PostShape::Video => "video",
            PostShape::DirectLink(_) => "direct",
            PostShape::Gallery(_) => "gallery",
            PostShape::PreviewOnly(_) => "preview",
            PostShape::InferredLink(_) => "inferred",
            PostShape::Unresolvable => "unresolvable",
        }
    }
}

/// Resolve an entry to a downloadable asset URL.
pub fn resolve(entry: &RawEntry) -> Option<String> {
    classify(entry).asset_url().map(str::to_string)
}

/// Classify an entry into its [`PostShape`].
pub fn classify(entry: &RawEntry) -> PostShape {
    if entry.is_self {
        return PostShape::SelfText;
    }
    if entry.is_video {
        return PostShape::Video;
    }

    let link = entry.link_url();
    let parsed = Url::parse(link).ok();

    if parsed.as_ref().is_some_and(is_image_url) {
        return PostShape::DirectLink(link.to_string());
    }

    if entry.is_gallery() {
        if let Some(url) = gallery_source_url(entry) {
            return PostShape::Gallery(url);
        }
    }

    if let Some(url) = entry
        .preview_source()
        .and_then(|s| s.url.as_deref())
        .map(unescape_amp)
        .filter(|u| !u.is_empty())
    {
        return PostShape::PreviewOnly(url);
    }

    if let Some(parsed) = parsed.as_ref() {
        if is_sharing_page(parsed) {
            return PostShape::InferredLink(format!("{}.jpg", link));
        }
    }

    PostShape::Unresolvable
}

/// Whether a URL is served from an image host or carries an image extension.
pub fn is_image_url(url: &Url) -> bool {
    if let Some(host) = url.host_str() {
        if IMAGE_HOSTS.contains(&host) {
            return true;
        }
    }

    has_image_extension(url.path())
}

/// Whether a path ends in one of [`IMAGE_EXTENSIONS`], ignoring case.
pub fn has_image_extension(path: &str) -> bool {
    let path = path.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Sharing-service page that is neither an album nor a gallery.
fn is_sharing_page(url: &Url) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };

    let on_sharing_host = host == SHARING_HOST
        || host
            .strip_suffix(SHARING_HOST)
            .is_some_and(|prefix| prefix.ends_with('.'));
    if !on_sharing_host || has_image_extension(url.path()) {
        return false;
    }

    let path = url.path();
    !path.contains("/a/") && !path.contains("/gallery/")
}

fn gallery_source_url(entry: &RawEntry) -> Option<String> {
    let source = entry.first_gallery_media()?.s?;
    let url = source.u.or(source.gif)?;
    let url = unescape_amp(&url);
    (!url.is_empty()).then_some(url)
}

/// Undo the `&amp;` escaping applied to rendered media URLs.
pub fn unescape_amp(url: &str) -> String {
    url.replace("&amp;", "&")
}
