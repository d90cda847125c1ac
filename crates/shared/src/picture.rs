use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Ordered, read-only view of the catalog after filtering.
///
/// Cloning is cheap; the catalog and the overlay share the same allocation.
pub type PictureSequence = Arc<[PictureRecord]>;

/// A single entry of the picture feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PictureRecord {
    pub url: String,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub comments: u32,
    #[serde(default)]
    pub date: String,
}

impl PictureRecord {
    pub fn new(url: impl Into<String>, likes: u32, comments: u32, date: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            likes,
            comments,
            date: date.into(),
        }
    }

    /// The url doubles as the stable key used by hash deep links.
    pub fn identifier(&self) -> &str {
        &self.url
    }

    /// Publication time, accepting RFC 3339 timestamps or bare `YYYY-MM-DD` dates.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.date.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}

pub fn empty_sequence() -> PictureSequence {
    Arc::from(Vec::new())
}
