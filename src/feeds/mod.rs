pub mod render;
pub mod service;

pub use service::FeedService;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::Entry;

/// Source of the session's entry list.
///
/// Every refresh inside a reading session passes `force_refresh = true`,
/// bypassing any transport-level cache; the initial load may reuse it.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_all(&self, force_refresh: bool) -> Result<Vec<Entry>>;
}

/// Produces the displayable text for an article, looked up by title within
/// the most recently fetched entry set.
pub trait ArticleRenderer: Send + Sync {
    fn render_article(&self, title: &str) -> Result<String>;
}

/// Hands an article off to the system browser, looked up by title.
pub trait ArticleOpener: Send + Sync {
    fn open_article(&self, title: &str) -> Result<()>;
}
