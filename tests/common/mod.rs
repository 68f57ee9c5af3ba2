// Each integration test file is a separate binary; helpers not used in every
// binary would otherwise trigger dead_code warnings from clippy.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    async_trait,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use pinned_repos::{
    cache::ResultCache, error::FetchError, fetch::PageSource, handlers, scrape::PinnedScraper,
    state::AppState,
};

pub const BASE_URL: &str = "https://github.com";

// ── Stub page source ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub enum StubResponse {
    Page { html: String, delay: Duration },
    Status(u16),
    NetworkError,
}

/// In-memory `PageSource`. Each URL has a script of responses; the n-th
/// fetch gets the n-th response and the last one repeats. Unknown URLs 404.
#[derive(Default)]
pub struct StubSource {
    scripts: Mutex<HashMap<String, Vec<StubResponse>>>,
    hits: Mutex<HashMap<String, usize>>,
    completed: Mutex<Vec<String>>,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, url: &str, html: impl Into<String>) -> Self {
        self.slow_page(url, html, Duration::ZERO)
    }

    pub fn slow_page(self, url: &str, html: impl Into<String>, delay: Duration) -> Self {
        self.script(
            url,
            vec![StubResponse::Page {
                html: html.into(),
                delay,
            }],
        )
    }

    pub fn script(self, url: &str, responses: Vec<StubResponse>) -> Self {
        self.set_script(url, responses);
        self
    }

    /// Replace the responses for `url` after the source is already shared.
    pub fn set_script(&self, url: &str, responses: Vec<StubResponse>) {
        self.scripts
            .lock()
            .unwrap()
            .insert(url.to_string(), responses);
    }

    pub fn set_page(&self, url: &str, html: impl Into<String>) {
        self.set_script(
            url,
            vec![StubResponse::Page {
                html: html.into(),
                delay: Duration::ZERO,
            }],
        );
    }

    pub fn hits(&self, url: &str) -> usize {
        self.hits.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    /// URLs in the order their fetches finished.
    pub fn completed(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for StubSource {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let hit = {
            let mut hits = self.hits.lock().unwrap();
            let count = hits.entry(url.to_string()).or_insert(0);
            *count += 1;
            *count - 1
        };
        let response = self
            .scripts
            .lock()
            .unwrap()
            .get(url)
            .and_then(|script| script.get(hit).or_else(|| script.last()).cloned());

        let result = match response {
            Some(StubResponse::Page { html, delay }) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                Ok(html)
            }
            Some(StubResponse::Status(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status,
            }),
            Some(StubResponse::NetworkError) => Err(FetchError::Body {
                url: url.to_string(),
                reason: "connection reset by peer".into(),
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        };
        self.completed.lock().unwrap().push(url.to_string());
        result
    }
}

// ── HTML fixtures ────────────────────────────────────────────────────────────

pub fn profile_url(username: &str) -> String {
    format!("{BASE_URL}/{username}")
}

pub fn repo_url(owner: &str, repo: &str) -> String {
    format!("{BASE_URL}/{owner}/{repo}")
}

/// A public pinned item with no description, written in Go, 12 stars, 3 forks.
/// `owner: None` mimics an item listed without an owner span.
pub fn pinned_item(owner: Option<&str>, repo: &str) -> String {
    let path_owner = owner.unwrap_or("someone");
    let owner_span = owner
        .map(|o| format!(r#"<span class="owner text-normal">{o}</span>/"#))
        .unwrap_or_default();
    format!(
        r#"<li class="pinned-item-list-item public source">
          <div class="pinned-item-list-item-content">
            <a href="/{path_owner}/{repo}">{owner_span}<span class="repo" title="{repo}">{repo}</span></a>
            <p class="mb-0 f6 color-fg-muted">
              <span class="repo-language-color" style="background-color: #00ADD8"></span>
              <span itemprop="programmingLanguage">Go</span>
              <a href="/{path_owner}/{repo}/stargazers" class="pinned-item-meta">12</a>
              <a href="/{path_owner}/{repo}/network/members" class="pinned-item-meta">3</a>
            </p>
          </div>
        </li>"#
    )
}

pub fn profile_page(items: &[String]) -> String {
    format!(
        r#"<html><body><div class="js-pinned-items-reorder-container"><ol>{}</ol></div></body></html>"#,
        items.concat()
    )
}

pub fn repo_page(image: Option<&str>, website: Option<&str>) -> String {
    let meta = image
        .map(|src| format!(r#"<meta property="og:image" content="{src}"/>"#))
        .unwrap_or_default();
    let link = website
        .map(|href| format!(r#"<a href="{href}">{href}</a>"#))
        .unwrap_or_default();
    format!(
        r#"<html><head><meta property="og:title" content="repo"/>{meta}</head>
        <body><div class="BorderGrid"><div class="BorderGrid-row">
          <div class="BorderGrid-cell"><h2>About</h2>{link}</div>
        </div></div></body></html>"#
    )
}

// ── App construction ─────────────────────────────────────────────────────────

pub fn scraper(source: Arc<StubSource>) -> PinnedScraper {
    PinnedScraper::new(source, BASE_URL)
}

pub fn test_cache() -> ResultCache {
    ResultCache::new(1024, Duration::from_secs(30 * 86_400))
}

pub fn create_test_app(source: Arc<StubSource>, cache: ResultCache) -> Router {
    handlers::router(AppState::new(source, BASE_URL, cache))
}

// ── Request helpers ──────────────────────────────────────────────────────────

pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl RawResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = get_raw(app, uri).await;
    (response.status, response.json())
}

pub async fn get_raw(app: Router, uri: &str) -> RawResponse {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("origin", "https://example.com")
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

pub async fn options(app: Router, uri: &str) -> RawResponse {
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

pub async fn send(app: Router, req: Request<Body>) -> RawResponse {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    RawResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}
