use serde::{Deserialize, Serialize};

/// One pinned repository as returned by `GET /?username=...`.
///
/// Optional fields are omitted from the JSON when absent; a pinned item may
/// legitimately lack a description, a language or a website.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinnedEntry {
    pub owner: String,
    pub repo: String,
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_color: Option<String>,
    pub stars: u64,
    pub forks: u64,
}

/// Serialize a scrape result into the snapshot stored in the result cache.
pub fn encode_snapshot(entries: &[PinnedEntry]) -> serde_json::Result<String> {
    serde_json::to_string(entries)
}
