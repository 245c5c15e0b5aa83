use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One fetched feed entry, as produced by the normalizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub feed_name: String,
    pub title: Option<String>,
    pub link: Option<String>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl Entry {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(Untitled)")
    }

    /// Best available body text for display
    pub fn display_content(&self) -> &str {
        self.content
            .as_deref()
            .or(self.summary.as_deref())
            .unwrap_or("")
    }
}

/// The minimal record the reading session keeps per entry.
///
/// Identity is positional within the session's list; the whole list is
/// replaced on every refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub title: String,
    pub feed_name: String,
    pub url: String,
}

impl DisplayItem {
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            title: entry.display_title().to_string(),
            feed_name: entry.feed_name.clone(),
            url: entry.link.clone().unwrap_or_default(),
        }
    }
}
