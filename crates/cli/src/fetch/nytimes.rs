//! NYT Archive API adapter: one month of documents, filtered down to
//! obituary material and converted into engine documents.

use chrono::NaiveDate;
use serde::Deserialize;

use necrolist_recon::ObituaryDocument;

use crate::exit_codes;
use crate::CliError;

use super::common::{FetchClient, FetchExitCodes};

const DEFAULT_API_BASE: &str = "https://api.nytimes.com/svc/archive/v1";

const CODES: FetchExitCodes = FetchExitCodes {
    auth: exit_codes::EXIT_ARCHIVE_AUTH,
    validation: exit_codes::EXIT_ARCHIVE_VALIDATION,
    rate_limit: exit_codes::EXIT_ARCHIVE_RATE_LIMIT,
    upstream: exit_codes::EXIT_ARCHIVE_UPSTREAM,
};

// ── Raw response shape ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    response: ArchiveDocs,
}

#[derive(Debug, Deserialize)]
struct ArchiveDocs {
    docs: Vec<RawDocument>,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(rename = "_id", default)]
    id: String,
    headline: RawHeadline,
    byline: Option<RawByline>,
    #[serde(default)]
    lead_paragraph: Option<String>,
    #[serde(rename = "abstract", default)]
    abstract_text: Option<String>,
    pub_date: String,
    web_url: String,
    #[serde(default)]
    print_section: Option<String>,
    #[serde(default)]
    print_page: Option<String>,
    #[serde(default)]
    type_of_material: Option<String>,
    #[serde(default)]
    keywords: Vec<RawKeyword>,
}

#[derive(Debug, Deserialize)]
struct RawHeadline {
    #[serde(default)]
    main: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawByline {
    #[serde(default)]
    original: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawKeyword {
    name: String,
    value: String,
}

// ── Client ──────────────────────────────────────────────────────────

pub struct ArchiveClient {
    client: FetchClient,
    api_base: String,
}

impl ArchiveClient {
    pub fn new() -> Self {
        Self::with_api_base(DEFAULT_API_BASE)
    }

    pub fn with_api_base(api_base: &str) -> Self {
        Self {
            client: FetchClient::new("NYT Archive", CODES),
            api_base: api_base.to_string(),
        }
    }

    /// Fetch one archive month, keeping obituary material only. Documents
    /// with an unparseable publication date are skipped with a warning —
    /// they cannot be matched to a day anyway.
    pub fn fetch_archive_month(
        &self,
        year: i32,
        month: u32,
        api_key: &str,
    ) -> Result<Vec<ObituaryDocument>, CliError> {
        let url = format!("{}/{}/{}.json", self.api_base, year, month);
        let body = self
            .client
            .get_json(|http| http.get(&url).query(&[("api-key", api_key)]))?;

        let parsed: ArchiveResponse =
            serde_json::from_value(body).map_err(|e| CliError {
                code: exit_codes::EXIT_ARCHIVE_UPSTREAM,
                message: format!("unexpected NYT Archive response shape: {e}"),
                hint: None,
            })?;

        let mut documents = Vec::new();
        for raw in parsed.response.docs {
            if !is_obituary(&raw) {
                continue;
            }
            match convert(raw) {
                Some(doc) => documents.push(doc),
                None => eprintln!("warning: skipping archive document with bad date or headline"),
            }
        }
        Ok(documents)
    }
}

impl Default for ArchiveClient {
    fn default() -> Self {
        Self::new()
    }
}

// ── Conversion ──────────────────────────────────────────────────────

fn is_obituary(raw: &RawDocument) -> bool {
    raw.type_of_material
        .as_deref()
        .is_some_and(|t| t.contains("Obituary"))
}

fn convert(raw: RawDocument) -> Option<ObituaryDocument> {
    // pub_date arrives as "2006-01-31T00:00:00+0000"; the date part is
    // all the engine needs.
    let date_part = raw.pub_date.get(..10)?;
    let publication_date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;
    let headline = raw.headline.main?;

    let person_keyword = raw
        .keywords
        .iter()
        .find(|k| k.name == "persons")
        .map(|k| k.value.clone());

    Some(ObituaryDocument {
        id: raw.id,
        headline,
        byline_raw: raw.byline.and_then(|b| b.original),
        lead_paragraph: raw.lead_paragraph,
        abstract_text: raw.abstract_text,
        publication_date,
        url: raw.web_url,
        print_section: raw.print_section.unwrap_or_default(),
        print_page: raw.print_page.unwrap_or_default(),
        material_type: raw.type_of_material,
        person_keyword,
    })
}
