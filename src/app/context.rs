use std::sync::Arc;

use crate::config::Config;
use crate::feeds::{ArticleOpener, ArticleRenderer, FeedService, FeedSource};
use crate::fetcher::{Fetcher, HttpFetcher};

/// The collaborators one reading session talks to.
///
/// In production all three handles point at a single [`FeedService`]; tests
/// substitute purpose-built stubs per seam.
pub struct AppContext {
    pub source: Arc<dyn FeedSource>,
    pub renderer: Arc<dyn ArticleRenderer>,
    pub opener: Arc<dyn ArticleOpener>,
}

impl AppContext {
    pub fn new(config: &Config) -> Self {
        let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::new());
        let service = Arc::new(FeedService::new(config.session_feeds(), fetcher));

        Self {
            source: service.clone(),
            renderer: service.clone(),
            opener: service,
        }
    }
}
