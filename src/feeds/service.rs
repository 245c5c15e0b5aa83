use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::app::{FreshetError, Result};
use crate::config::FeedConfig;
use crate::domain::Entry;
use crate::feeds::{render, ArticleOpener, ArticleRenderer, FeedSource};
use crate::fetcher::{FetchResult, Fetcher, Validators};
use crate::normalizer::Normalizer;

const MAX_CONCURRENT_FETCHES: usize = 8;

#[derive(Debug, Clone, Default)]
struct FeedCache {
    validators: Validators,
    entries: Vec<Entry>,
}

/// Fetches all configured feeds, caches the last result, and serves article
/// renders and browser opens out of that cache.
///
/// Implements every collaborator contract the reading session consumes.
pub struct FeedService {
    feeds: Vec<FeedConfig>,
    fetcher: Arc<dyn Fetcher>,
    normalizer: Normalizer,
    semaphore: Arc<Semaphore>,
    cache: RwLock<HashMap<String, FeedCache>>,
}

impl FeedService {
    pub fn new(feeds: Vec<FeedConfig>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            feeds,
            fetcher,
            normalizer: Normalizer::new(),
            semaphore: Arc::new(Semaphore::new(MAX_CONCURRENT_FETCHES)),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Cached entries flattened in configured feed order.
    fn merged_entries(&self) -> Vec<Entry> {
        let cache = self.cache.read().expect("cache lock poisoned");
        self.feeds
            .iter()
            .filter_map(|feed| cache.get(&feed.url))
            .flat_map(|cached| cached.entries.iter().cloned())
            .collect()
    }

    fn find_entry(&self, title: &str) -> Option<Entry> {
        let cache = self.cache.read().expect("cache lock poisoned");
        self.feeds
            .iter()
            .filter_map(|feed| cache.get(&feed.url))
            .flat_map(|cached| cached.entries.iter())
            .find(|entry| entry.display_title() == title)
            .cloned()
    }

    fn validators_for(&self, url: &str) -> Option<Validators> {
        let cache = self.cache.read().expect("cache lock poisoned");
        cache.get(url).map(|cached| cached.validators.clone())
    }
}

#[async_trait]
impl FeedSource for FeedService {
    async fn fetch_all(&self, force_refresh: bool) -> Result<Vec<Entry>> {
        let mut handles = Vec::new();

        for feed in self.feeds.clone() {
            let fetcher = self.fetcher.clone();
            let normalizer = self.normalizer.clone();
            let semaphore = self.semaphore.clone();
            let validators = if force_refresh {
                None
            } else {
                self.validators_for(&feed.url)
            };

            handles.push(tokio::spawn(async move {
                let _permit = semaphore.acquire().await.expect("Semaphore closed");

                match fetcher.fetch(&feed.url, validators.as_ref()).await? {
                    FetchResult::NotModified => Ok::<_, FreshetError>((feed, None)),
                    FetchResult::Content { body, validators } => {
                        let entries = normalizer.normalize(&feed.name, &body)?;
                        Ok((feed, Some((validators, entries))))
                    }
                }
            }));
        }

        for handle in handles {
            let (feed, outcome) = handle
                .await
                .map_err(|e| FreshetError::TaskJoin(e.to_string()))??;

            match outcome {
                Some((validators, entries)) => {
                    debug!(feed = %feed.name, count = entries.len(), "feed fetched");
                    let mut cache = self.cache.write().expect("cache lock poisoned");
                    cache.insert(feed.url, FeedCache { validators, entries });
                }
                // 304: the cached entries for this feed stay valid
                None => debug!(feed = %feed.name, "feed not modified"),
            }
        }

        Ok(self.merged_entries())
    }
}

impl ArticleRenderer for FeedService {
    fn render_article(&self, title: &str) -> Result<String> {
        let entry = self
            .find_entry(title)
            .ok_or_else(|| FreshetError::ArticleNotFound(title.to_string()))?;
        Ok(render::article_text(&entry))
    }
}

impl ArticleOpener for FeedService {
    fn open_article(&self, title: &str) -> Result<()> {
        let entry = self
            .find_entry(title)
            .ok_or_else(|| FreshetError::ArticleNotFound(title.to_string()))?;
        let url = entry
            .link
            .as_deref()
            .filter(|link| !link.is_empty())
            .ok_or_else(|| FreshetError::ArticleNotFound(title.to_string()))?;

        open::that(url).map_err(FreshetError::Browser)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    const FEED_A: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>A</title>
  <item><title>Alpha</title><link>https://a.example/alpha</link><guid>a1</guid>
    <description>First body</description></item>
  <item><title>Beta</title><link>https://a.example/beta</link><guid>a2</guid>
    <description>Second body</description></item>
</channel></rss>"#;

    const FEED_B: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel><title>B</title>
  <item><title>Gamma</title><link>https://b.example/gamma</link><guid>b1</guid>
    <description>Third body</description></item>
</channel></rss>"#;

    struct StubFetcher {
        bodies: HashMap<String, &'static str>,
        validator_presented: Mutex<Vec<(String, bool)>>,
    }

    impl StubFetcher {
        fn new(bodies: Vec<(&str, &'static str)>) -> Self {
            Self {
                bodies: bodies
                    .into_iter()
                    .map(|(url, body)| (url.to_string(), body))
                    .collect(),
                validator_presented: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Fetcher for StubFetcher {
        async fn fetch(
            &self,
            url: &str,
            validators: Option<&Validators>,
        ) -> Result<FetchResult> {
            self.validator_presented
                .lock()
                .unwrap()
                .push((url.to_string(), validators.is_some()));

            if validators.is_some() {
                return Ok(FetchResult::NotModified);
            }

            let body = self.bodies[url].as_bytes().to_vec();
            Ok(FetchResult::Content {
                body,
                validators: Validators {
                    etag: Some("\"v1\"".into()),
                    last_modified: None,
                },
            })
        }
    }

    fn feed(name: &str, url: &str) -> FeedConfig {
        FeedConfig {
            name: name.into(),
            url: url.into(),
        }
    }

    fn service(feeds: Vec<FeedConfig>, fetcher: Arc<StubFetcher>) -> FeedService {
        FeedService::new(feeds, fetcher)
    }

    #[tokio::test]
    async fn test_fetch_all_merges_in_config_order() {
        let fetcher = Arc::new(StubFetcher::new(vec![
            ("https://a.example/feed", FEED_A),
            ("https://b.example/feed", FEED_B),
        ]));
        let svc = service(
            vec![
                feed("a", "https://a.example/feed"),
                feed("b", "https://b.example/feed"),
            ],
            fetcher,
        );

        let entries = svc.fetch_all(true).await.unwrap();
        let titles: Vec<_> = entries.iter().map(|e| e.display_title()).collect();
        assert_eq!(titles, vec!["Alpha", "Beta", "Gamma"]);
        assert_eq!(entries[0].feed_name, "a");
        assert_eq!(entries[2].feed_name, "b");
    }

    #[tokio::test]
    async fn test_force_refresh_bypasses_validators() {
        let fetcher = Arc::new(StubFetcher::new(vec![("https://a.example/feed", FEED_A)]));
        let svc = service(vec![feed("a", "https://a.example/feed")], fetcher.clone());

        // first load populates validators, second non-forced call presents
        // them, a forced call must not
        svc.fetch_all(false).await.unwrap();
        svc.fetch_all(false).await.unwrap();
        svc.fetch_all(true).await.unwrap();

        let presented: Vec<bool> = fetcher
            .validator_presented
            .lock()
            .unwrap()
            .iter()
            .map(|(_, presented)| *presented)
            .collect();
        assert_eq!(presented, vec![false, true, false]);
    }

    #[tokio::test]
    async fn test_not_modified_keeps_cached_entries() {
        let fetcher = Arc::new(StubFetcher::new(vec![("https://a.example/feed", FEED_A)]));
        let svc = service(vec![feed("a", "https://a.example/feed")], fetcher);

        let first = svc.fetch_all(false).await.unwrap();
        let second = svc.fetch_all(false).await.unwrap();
        assert_eq!(first.len(), second.len());
        assert_eq!(second[0].display_title(), "Alpha");
    }

    #[tokio::test]
    async fn test_render_article_by_title() {
        let fetcher = Arc::new(StubFetcher::new(vec![("https://a.example/feed", FEED_A)]));
        let svc = service(vec![feed("a", "https://a.example/feed")], fetcher);
        svc.fetch_all(true).await.unwrap();

        let text = svc.render_article("Beta").unwrap();
        assert!(text.starts_with("Beta\n"));
        assert!(text.contains("Second body"));
    }

    #[tokio::test]
    async fn test_render_unknown_title_is_an_error() {
        let fetcher = Arc::new(StubFetcher::new(vec![("https://a.example/feed", FEED_A)]));
        let svc = service(vec![feed("a", "https://a.example/feed")], fetcher);
        svc.fetch_all(true).await.unwrap();

        let result = svc.render_article("Nope");
        assert!(matches!(result, Err(FreshetError::ArticleNotFound(_))));
    }
}
