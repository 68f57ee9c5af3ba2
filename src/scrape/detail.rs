use std::sync::Arc;

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::fetch::PageSource;

static OG_IMAGE: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[property="og:image"]"#).expect("static CSS selector must parse")
});
static SIDEBAR_CELL: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(".BorderGrid-cell").expect("static CSS selector must parse")
});
static SECURE_LINK: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"a[href^="https"]"#).expect("static CSS selector must parse")
});

/// Loads a repository page to recover what the profile page does not show.
///
/// Every lookup is best effort: fetch failures are logged and become `None`.
#[derive(Clone)]
pub struct DetailFetcher {
    source: Arc<dyn PageSource>,
}

impl DetailFetcher {
    pub fn new(source: Arc<dyn PageSource>) -> Self {
        Self { source }
    }

    /// Preview image and website of the repository at `url`, fetched
    /// concurrently.
    pub async fn fetch_details(&self, url: &str) -> (Option<String>, Option<String>) {
        tokio::join!(self.fetch_image(url), self.fetch_website(url))
    }

    pub async fn fetch_image(&self, url: &str) -> Option<String> {
        let page = self.load(url, "image").await?;
        og_image(&page)
    }

    pub async fn fetch_website(&self, url: &str) -> Option<String> {
        let page = self.load(url, "website").await?;
        sidebar_website(&page)
    }

    async fn load(&self, url: &str, purpose: &'static str) -> Option<String> {
        match self.source.fetch(url).await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!(error = %e, url = %url, purpose, "Failed to fetch repository page");
                None
            }
        }
    }
}

/// `content` of the first `og:image` meta tag.
pub fn og_image(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let image = document
        .select(&OG_IMAGE)
        .filter_map(|el| el.value().attr("content"))
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty());
    image
}

/// First `https` link inside the first sidebar cell, which holds the
/// repository's "About" box.
pub fn sidebar_website(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let website = document
        .select(&SIDEBAR_CELL)
        .next()?
        .select(&SECURE_LINK)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    website
}
