use std::time::Duration;

use axum::async_trait;
use reqwest::Client as ReqwestClient;

use crate::error::FetchError;

pub const USER_AGENT: &str =
    "Mozilla/5.0 (compatible; PinnedReposBot/1.0; +https://github.com/pinned-repos)";

/// Anything that can turn a URL into an HTML page body.
///
/// The body is returned as text rather than a parsed document: the parsed
/// `scraper::Html` tree is not `Send`, so callers parse it in a synchronous
/// scope after the await completes.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Production `PageSource` backed by a shared `reqwest` client.
#[derive(Clone)]
pub struct HttpFetcher {
    client: ReqwestClient,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}
