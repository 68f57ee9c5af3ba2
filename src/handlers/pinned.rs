use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::encode_snapshot;
use crate::state::AppState;

pub const HELP_PAGE: &str = r#"<!doctype html>
<head>
  <meta charset="utf-8" />
  <title>GitHub pinned repos API</title>
</head>
<style>body {font-family: Helvetica, serif;margin: 30px;}</style>
<p>GET /?username=GITHUB_USERNAME</p>
<p>Add <code>&amp;refresh=1</code> to bypass the cache.</p>

<p>
  <form action="/">
    <input type="text" name="username" placeholder="username" />
    <button type="submit">Go!</button>
  </form>
</p>
"#;

// ── Query params ───────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct PinnedQuery {
    pub username: Option<String>,
    pub refresh: Option<String>,
}

impl PinnedQuery {
    /// `?refresh`, `?refresh=0` and `?refresh=false` do not force a re-scrape.
    pub fn wants_refresh(&self) -> bool {
        match self.refresh.as_deref().map(str::trim) {
            None | Some("") | Some("0") => false,
            Some(flag) => !flag.eq_ignore_ascii_case("false"),
        }
    }
}

// ── Handler ────────────────────────────────────────────────────────────────

/// GET /?username=<id>[&refresh=1]
///
/// Returns the pinned repositories of a profile as JSON, served from the
/// result cache unless missing, expired or a refresh is requested. Without a
/// username, returns the HTML help page.
pub async fn get_pinned(
    State(state): State<AppState>,
    Query(params): Query<PinnedQuery>,
) -> AppResult<Response> {
    let Some(username) = params.username.as_deref().filter(|u| !u.trim().is_empty()) else {
        return Ok(Html(HELP_PAGE).into_response());
    };

    if !params.wants_refresh() {
        if let Some(snapshot) = state.cache.get(username) {
            tracing::debug!(username, "Serving pinned repositories from cache");
            return Ok(json_snapshot(snapshot));
        }
    }

    let entries = state.scraper.scrape_pinned(username).await?;
    let snapshot = encode_snapshot(&entries).map_err(|e| {
        tracing::error!(error = ?e, "Failed to serialize pinned repositories");
        AppError::Internal
    })?;

    state.cache.set(username, snapshot.clone());
    tracing::info!(username, count = entries.len(), "Refreshed pinned repositories");

    Ok(json_snapshot(snapshot))
}

/// The cached snapshot is already JSON, so it is sent as-is.
fn json_snapshot(snapshot: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], snapshot).into_response()
}
