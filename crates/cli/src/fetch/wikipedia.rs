//! Wikipedia adapter: raw wikitext fetch plus the title/backlink probes
//! the reconciler needs.
//!
//! Uses the MediaWiki Action API with `formatversion=2` (pages come back
//! as an array, `missing` is a plain boolean).

use necrolist_recon::{EngineError, WikiProbe};

use crate::exit_codes;
use crate::CliError;

use super::common::{FetchClient, FetchExitCodes};

const DEFAULT_API_BASE: &str = "https://en.wikipedia.org/w/api.php";

const CODES: FetchExitCodes = FetchExitCodes {
    auth: exit_codes::EXIT_WIKI_UPSTREAM,
    validation: exit_codes::EXIT_WIKI_UPSTREAM,
    rate_limit: exit_codes::EXIT_WIKI_RATE_LIMIT,
    upstream: exit_codes::EXIT_WIKI_UPSTREAM,
};

/// Backlinks are only counted up to one API page; the notability
/// threshold sits far below this cap.
const BACKLINK_LIMIT: &str = "500";

pub struct WikipediaClient {
    client: FetchClient,
    api_base: String,
}

impl WikipediaClient {
    pub fn new() -> Self {
        Self::with_api_base(DEFAULT_API_BASE)
    }

    pub fn with_api_base(api_base: &str) -> Self {
        Self {
            client: FetchClient::new("Wikipedia", CODES),
            api_base: api_base.to_string(),
        }
    }

    /// Fetch an article's current wikitext. A missing page is its own
    /// exit condition: the operator is told which title was absent and
    /// the rest of the run continues where applicable.
    pub fn fetch_raw_wikitext(&self, title: &str) -> Result<String, CliError> {
        let body = self.client.get_json(|http| {
            http.get(&self.api_base).query(&[
                ("action", "query"),
                ("prop", "revisions"),
                ("rvprop", "content"),
                ("rvslots", "main"),
                ("redirects", "1"),
                ("format", "json"),
                ("formatversion", "2"),
                ("titles", title),
            ])
        })?;

        if page_missing(&body) {
            return Err(CliError {
                code: exit_codes::EXIT_WIKI_NOT_FOUND,
                message: format!("page not found: {title}"),
                hint: None,
            });
        }
        content_of(&body).ok_or_else(|| CliError {
            code: exit_codes::EXIT_WIKI_UPSTREAM,
            message: format!("no revision content in Wikipedia response for {title}"),
            hint: None,
        })
    }

    fn title_exists_raw(&self, title: &str) -> Result<bool, CliError> {
        let body = self.client.get_json(|http| {
            http.get(&self.api_base).query(&[
                ("action", "query"),
                ("redirects", "1"),
                ("format", "json"),
                ("formatversion", "2"),
                ("titles", title),
            ])
        })?;
        Ok(!page_missing(&body))
    }

    fn incoming_link_count_raw(&self, title: &str) -> Result<u32, CliError> {
        let body = self.client.get_json(|http| {
            http.get(&self.api_base).query(&[
                ("action", "query"),
                ("list", "backlinks"),
                ("bltitle", title),
                ("bllimit", BACKLINK_LIMIT),
                ("format", "json"),
                ("formatversion", "2"),
            ])
        })?;
        Ok(backlink_count(&body) as u32)
    }
}

impl Default for WikipediaClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WikiProbe for WikipediaClient {
    fn title_exists(&self, title: &str) -> Result<bool, EngineError> {
        self.title_exists_raw(title)
            .map_err(|e| EngineError::Probe(e.message))
    }

    fn incoming_link_count(&self, title: &str) -> Result<u32, EngineError> {
        self.incoming_link_count_raw(title)
            .map_err(|e| EngineError::Probe(e.message))
    }
}

// ── Response extraction ─────────────────────────────────────────────

fn first_page(body: &serde_json::Value) -> Option<&serde_json::Value> {
    body.get("query")?.get("pages")?.as_array()?.first()
}

fn page_missing(body: &serde_json::Value) -> bool {
    first_page(body)
        .and_then(|p| p.get("missing"))
        .and_then(|m| m.as_bool())
        .unwrap_or(false)
}

fn content_of(body: &serde_json::Value) -> Option<String> {
    first_page(body)?
        .get("revisions")?
        .as_array()?
        .first()?
        .get("slots")?
        .get("main")?
        .get("content")?
        .as_str()
        .map(str::to_string)
}

fn backlink_count(body: &serde_json::Value) -> usize {
    body.get("query")
        .and_then(|q| q.get("backlinks"))
        .and_then(|b| b.as_array())
        .map(|b| b.len())
        .unwrap_or(0)
}
