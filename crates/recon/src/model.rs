use chrono::NaiveDate;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Wiki side
// ---------------------------------------------------------------------------

/// One person's bullet entry inside a "Deaths in Month Year" list article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Display form of the name (`Sir Elton John`).
    pub name: String,
    /// Canonical article title (`Elton John`). Identity key within a month.
    pub linked_name: String,
    /// Free-text bio blurb after the wikilink.
    pub information: String,
    /// Existing reference markup, verbatim, starting at `<ref`.
    pub citation_markup: Option<String>,
    pub death_date: NaiveDate,
}

// ---------------------------------------------------------------------------
// Archive side
// ---------------------------------------------------------------------------

/// One archive document for a given month, obituary material only.
#[derive(Debug, Clone)]
pub struct ObituaryDocument {
    pub id: String,
    pub headline: String,
    pub byline_raw: Option<String>,
    pub lead_paragraph: Option<String>,
    pub abstract_text: Option<String>,
    pub publication_date: NaiveDate,
    pub url: String,
    pub print_section: String,
    pub print_page: String,
    pub material_type: Option<String>,
    /// Value of the archive `persons` keyword (`"Surname, Firstname Middle"`).
    pub person_keyword: Option<String>,
}

/// A document plus the derived fields the reconciler consumes.
/// Built as a fresh value at ingestion time; the fetched document is
/// never mutated.
#[derive(Debug, Clone)]
pub struct AnnotatedDocument {
    pub doc: ObituaryDocument,
    /// `None` when no resolution strategy succeeded — a normal outcome
    /// given free-text variance, not an error.
    pub resolved_death_date: Option<NaiveDate>,
    /// Candidate full names, most specific first.
    pub candidate_names: Vec<String>,
}

// ---------------------------------------------------------------------------
// Citation
// ---------------------------------------------------------------------------

/// A structured reference record, renderable as `{{cite news}}` markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Citation {
    pub author: String,
    pub author_link: String,
    pub title: String,
    pub url: String,
    pub url_access: String,
    pub work: String,
    pub agency: String,
    pub publisher: String,
    pub language: String,
    pub location: String,
    pub access_date: Option<NaiveDate>,
    pub date: Option<NaiveDate>,
    pub page: String,
    pub quote: String,
}

// ---------------------------------------------------------------------------
// Reconciliation output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Entry had no citation; one was built from the document.
    Add,
    /// Entry had an NYT web citation; rebuilt, access-date inherited.
    Update,
    /// Entry had a news-template or bare-link citation; displaced.
    Replace,
    /// Existing citation wins under the precedence policy.
    Keep,
    /// Wiki and archive disagree on the death date; manual reconciliation.
    DateMismatch,
    /// Person is absent from the list but looks notable; manual review.
    NotabilityReviewNeeded,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Update => write!(f, "update"),
            Self::Replace => write!(f, "replace"),
            Self::Keep => write!(f, "keep"),
            Self::DateMismatch => write!(f, "date_mismatch"),
            Self::NotabilityReviewNeeded => write!(f, "notability_review_needed"),
        }
    }
}

/// One reconciliation decision, terminal per document.
#[derive(Debug, Clone, Serialize)]
pub struct Reconciliation {
    pub outcome: Outcome,
    /// Matched article title, or the probed candidate for review outcomes.
    pub person: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_date: Option<NaiveDate>,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incoming_links: Option<u32>,
    /// Citation built for add/update/replace outcomes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citation: Option<Citation>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconSummary {
    pub documents: usize,
    /// Documents with a resolved death date inside the month.
    pub dated: usize,
    pub matched: usize,
    /// Dated documents no list entry or review outcome claimed.
    pub unmatched: usize,
    pub added: usize,
    pub updated: usize,
    pub replaced: usize,
    pub kept: usize,
    pub date_mismatches: usize,
    pub review_needed: usize,
}

/// Result of one month pass.
#[derive(Debug)]
pub struct MonthReport {
    /// Entries with citation markup applied for add/update/replace.
    pub entries: Vec<Entry>,
    pub records: Vec<Reconciliation>,
    pub summary: ReconSummary,
}
