use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, IF_MODIFIED_SINCE, IF_NONE_MATCH};
use reqwest::{Client, Response, StatusCode};

use crate::app::Result;

/// Cache validators carried over from a previous fetch of the same URL.
#[derive(Debug, Clone, Default)]
pub struct Validators {
    pub etag: Option<String>,
    pub last_modified: Option<String>,
}

#[derive(Debug)]
pub enum FetchResult {
    /// New document downloaded, with the validators for the next request
    Content {
        body: Vec<u8>,
        validators: Validators,
    },
    /// Server answered HTTP 304 for the presented validators
    NotModified,
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch one feed document. Presenting validators allows a 304
    /// short-circuit; passing `None` forces a full download.
    async fn fetch(&self, url: &str, validators: Option<&Validators>) -> Result<FetchResult>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("freshet/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, validators: Option<&Validators>) -> Result<FetchResult> {
        let mut headers = HeaderMap::new();
        if let Some(validators) = validators {
            if let Some(value) = header_value(validators.etag.as_deref()) {
                headers.insert(IF_NONE_MATCH, value);
            }
            if let Some(value) = header_value(validators.last_modified.as_deref()) {
                headers.insert(IF_MODIFIED_SINCE, value);
            }
        }

        let response = self.client.get(url).headers(headers).send().await?;

        if response.status() == StatusCode::NOT_MODIFIED {
            return Ok(FetchResult::NotModified);
        }

        response.error_for_status_ref()?;

        let validators = Validators {
            etag: header_string(&response, "etag"),
            last_modified: header_string(&response, "last-modified"),
        };
        let body = response.bytes().await?.to_vec();

        Ok(FetchResult::Content { body, validators })
    }
}

fn header_value(raw: Option<&str>) -> Option<HeaderValue> {
    raw.and_then(|s| HeaderValue::from_str(s).ok())
}

fn header_string(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}
