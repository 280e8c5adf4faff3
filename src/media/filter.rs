//! Inclusion policy for resolved entries.

use std::fmt;

use crate::api::types::RawEntry;

/// Thresholds a post must meet to be downloaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterPolicy {
    pub min_score: i64,
    pub min_width: u32,
    pub min_height: u32,
    pub include_nsfw: bool,
}

/// Why an entry was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    SelfText,
    Video,
    Sensitive,
    NoAsset,
    Score { score: i64, min: i64 },
    Width { width: u32, min: u32 },
    Height { height: u32, min: u32 },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::SelfText => write!(f, "self post"),
            Rejection::Video => write!(f, "video post"),
            Rejection::Sensitive => write!(f, "sensitive content"),
            Rejection::NoAsset => write!(f, "no resolvable image"),
            Rejection::Score { score, min } => write!(f, "score {} below {}", score, min),
            Rejection::Width { width, min } => write!(f, "width {} below {}", width, min),
            Rejection::Height { height, min } => write!(f, "height {} below {}", height, min),
        }
    }
}

/// Evaluate an entry against the policy, returning the first rejection.
///
/// Checks run in a fixed order: self/video, sensitivity, asset presence,
/// score, width, height. Unknown (zero) dimensions are never filtered on.
pub fn evaluate(
    entry: &RawEntry,
    resolved_url: Option<&str>,
    policy: &FilterPolicy,
) -> Result<(), Rejection> {
    if entry.is_self {
        return Err(Rejection::SelfText);
    }
    if entry.is_video {
        return Err(Rejection::Video);
    }
    if entry.over_18 && !policy.include_nsfw {
        return Err(Rejection::Sensitive);
    }
    if resolved_url.map_or(true, str::is_empty) {
        return Err(Rejection::NoAsset);
    }
    if entry.score < policy.min_score {
        return Err(Rejection::Score {
            score: entry.score,
            min: policy.min_score,
        });
    }

    let (width, height) = entry.dimensions();
    if width != 0 && width < policy.min_width {
        return Err(Rejection::Width {
            width,
            min: policy.min_width,
        });
    }
    if height != 0 && height < policy.min_height {
        return Err(Rejection::Height {
            height,
            min: policy.min_height,
        });
    }

    Ok(())
}

/// Whether an entry passes the policy.
pub fn accept(entry: &RawEntry, resolved_url: Option<&str>, policy: &FilterPolicy) -> bool {
    evaluate(entry, resolved_url, policy).is_ok()
}
