use std::sync::Arc;

use crate::cache::ResultCache;
use crate::config::Config;
use crate::fetch::{HttpFetcher, PageSource};
use crate::scrape::PinnedScraper;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub scraper: PinnedScraper,
    pub cache: ResultCache,
}

impl AppState {
    pub fn new(source: Arc<dyn PageSource>, base_url: &str, cache: ResultCache) -> Self {
        Self {
            scraper: PinnedScraper::new(source, base_url),
            cache,
        }
    }

    /// Production wiring: a real HTTP fetcher and a cache sized from config.
    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        let fetcher = HttpFetcher::new(config.fetch_timeout)?;
        let cache = ResultCache::new(config.cache_max_entries, config.cache_max_age);
        Ok(Self::new(Arc::new(fetcher), &config.base_url, cache))
    }
}
