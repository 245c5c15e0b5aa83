use chrono::Utc;
use feed_rs::parser;
use html_escape::decode_html_entities;

use crate::app::{FreshetError, Result};
use crate::domain::Entry;

/// Converts RSS/Atom/JSON-Feed documents into display entries.
#[derive(Clone, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, feed_name: &str, body: &[u8]) -> Result<Vec<Entry>> {
        let feed = parser::parse(body).map_err(|e| FreshetError::FeedParse(e.to_string()))?;

        let entries = feed
            .entries
            .into_iter()
            .map(|entry| Entry {
                feed_name: feed_name.to_string(),
                title: entry
                    .title
                    .map(|t| decode_html_entities(&t.content).to_string()),
                link: entry.links.first().map(|l| l.href.clone()),
                author: entry.authors.first().map(|a| a.name.clone()),
                summary: entry
                    .summary
                    .map(|s| decode_html_entities(&s.content).to_string()),
                content: entry
                    .content
                    .and_then(|c| c.body)
                    .map(|b| decode_html_entities(&b).to_string()),
                published_at: entry
                    .published
                    .or(entry.updated)
                    .map(|dt| dt.with_timezone(&Utc)),
            })
            .collect();

        Ok(entries)
    }
}
