pub mod detail;
pub mod extract;

use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};

use crate::error::FetchError;
use crate::fetch::PageSource;
use crate::models::PinnedEntry;

pub use detail::DetailFetcher;
pub use extract::EntryFields;

/// Scrapes the pinned repositories of a profile and enriches each one from
/// its repository page.
#[derive(Clone)]
pub struct PinnedScraper {
    source: Arc<dyn PageSource>,
    details: DetailFetcher,
    base_url: String,
}

impl PinnedScraper {
    pub fn new(source: Arc<dyn PageSource>, base_url: impl Into<String>) -> Self {
        Self {
            details: DetailFetcher::new(source.clone()),
            source,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn profile_url(&self, username: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(username))
    }

    pub fn repo_link(&self, owner: &str, repo: &str) -> String {
        format!("{}/{}/{}", self.base_url, owner, repo)
    }

    /// Pinned repositories of `username`, in the order the profile shows them.
    ///
    /// Only a failure to load the profile page itself is an error. A profile
    /// without pinned items yields an empty list, and failures while enriching
    /// an entry only leave the affected fields empty.
    pub async fn scrape_pinned(&self, username: &str) -> Result<Vec<PinnedEntry>, FetchError> {
        let body = self.source.fetch(&self.profile_url(username)).await?;
        let items = extract::extract_pinned(&body);
        if items.is_empty() {
            tracing::debug!(username, "Profile has no pinned repositories");
            return Ok(Vec::new());
        }

        let mut slots: Vec<Option<PinnedEntry>> = vec![None; items.len()];
        let mut pending: FuturesUnordered<_> = items
            .into_iter()
            .enumerate()
            .map(|(index, fields)| async move { (index, self.enrich(username, fields).await) })
            .collect();

        // completion order is arbitrary; the slot index restores page order
        while let Some((index, entry)) = pending.next().await {
            slots[index] = Some(entry);
        }

        let entries: Vec<PinnedEntry> = slots.into_iter().flatten().collect();
        tracing::debug!(username, count = entries.len(), "Scraped pinned repositories");
        Ok(entries)
    }

    async fn enrich(&self, username: &str, fields: EntryFields) -> PinnedEntry {
        let owner = fields.owner.unwrap_or_else(|| username.to_string());
        let repo = fields.repo.unwrap_or_default();
        let link = self.repo_link(&owner, &repo);
        let (image, website) = self.details.fetch_details(&link).await;

        PinnedEntry {
            owner,
            repo,
            link,
            description: fields.description,
            image,
            website,
            language: fields.language,
            language_color: fields.language_color,
            stars: fields.stars.unwrap_or(0),
            forks: fields.forks.unwrap_or(0),
        }
    }
}
