use thiserror::Error;

#[derive(Error, Debug)]
pub enum FreshetError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Article not found: {0}")]
    ArticleNotFound(String),

    #[error("Failed to open browser: {0}")]
    Browser(#[source] std::io::Error),

    #[error("Fetch task failed: {0}")]
    TaskJoin(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FreshetError>;
