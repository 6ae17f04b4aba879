//! Reference reconciliation: match annotated archive documents against
//! list entries and decide the citation action per person.
//!
//! Per document the state machine is single-shot: unmatched → one of
//! {add, update, replace, keep, date_mismatch, notability_review_needed},
//! all terminal. No retries, no revisits.

use chrono::NaiveDate;

use crate::calendar;
use crate::citation::{self, ExistingCitation};
use crate::config::PolicyConfig;
use crate::deathdate::Resolver;
use crate::error::EngineError;
use crate::model::{
    AnnotatedDocument, Entry, MonthReport, ObituaryDocument, Outcome, ReconSummary,
    Reconciliation,
};
use crate::names;

/// Wiki-side lookups the reconciler needs. Implemented over the live
/// Wikipedia API by the caller, by stubs in tests.
pub trait WikiProbe {
    fn title_exists(&self, title: &str) -> Result<bool, EngineError>;
    fn incoming_link_count(&self, title: &str) -> Result<u32, EngineError>;
}

/// Stamp each fetched document with its resolved death date and candidate
/// names. Produces fresh annotated values; the fetched documents are not
/// touched again afterwards.
pub fn annotate(
    documents: Vec<ObituaryDocument>,
    resolver: &Resolver,
    month: u32,
    year: i32,
) -> Vec<AnnotatedDocument> {
    documents
        .into_iter()
        .map(|doc| {
            let resolved_death_date = resolver.resolve(
                doc.publication_date,
                month,
                year,
                doc.lead_paragraph.as_deref(),
                doc.abstract_text.as_deref(),
            );
            let raw = names::raw_name_of(&doc.headline, doc.person_keyword.as_deref());
            let candidate_names = names::generate(raw.as_deref());
            AnnotatedDocument {
                doc,
                resolved_death_date,
                candidate_names,
            }
        })
        .collect()
}

/// Run the month pass: one decision per document whose resolved death
/// date falls inside the month. Entries come back with citation markup
/// applied for add/update/replace outcomes.
pub fn reconcile(
    mut entries: Vec<Entry>,
    documents: &[AnnotatedDocument],
    probe: &dyn WikiProbe,
    policy: &PolicyConfig,
    today: NaiveDate,
    month: u32,
    year: i32,
) -> Result<MonthReport, EngineError> {
    let mut records = Vec::new();
    let mut summary = ReconSummary {
        documents: documents.len(),
        ..ReconSummary::default()
    };

    for day in 1..=calendar::days_in_month(year, month) {
        let date = match NaiveDate::from_ymd_opt(year, month, day) {
            Some(d) => d,
            None => break,
        };
        for annotated in documents
            .iter()
            .filter(|d| d.resolved_death_date == Some(date))
        {
            summary.dated += 1;
            if let Some(record) =
                reconcile_document(&mut entries, annotated, date, probe, policy, today, &mut summary)?
            {
                records.push(record);
            }
        }
    }

    Ok(MonthReport {
        entries,
        records,
        summary,
    })
}

fn reconcile_document(
    entries: &mut [Entry],
    annotated: &AnnotatedDocument,
    document_date: NaiveDate,
    probe: &dyn WikiProbe,
    policy: &PolicyConfig,
    today: NaiveDate,
    summary: &mut ReconSummary,
) -> Result<Option<Reconciliation>, EngineError> {
    // First candidate that resolves to an existing article wins; the
    // variant order is most-specific-first.
    let mut matched_name = None;
    for candidate in &annotated.candidate_names {
        if probe.title_exists(candidate)? {
            matched_name = Some(candidate.clone());
            break;
        }
    }
    let name = match matched_name {
        Some(n) => n,
        None => {
            summary.unmatched += 1;
            return Ok(None);
        }
    };

    let entry = match entries.iter_mut().find(|e| e.linked_name == name) {
        Some(e) => e,
        None => {
            // Missing from the list: flag for manual review when the
            // article looks notable enough, never auto-inserted.
            let links = probe.incoming_link_count(&name)?;
            if links >= policy.notability_link_threshold {
                summary.review_needed += 1;
                return Ok(Some(Reconciliation {
                    outcome: Outcome::NotabilityReviewNeeded,
                    person: name,
                    entry_date: None,
                    document_date: Some(document_date),
                    url: annotated.doc.url.clone(),
                    incoming_links: Some(links),
                    citation: None,
                }));
            }
            summary.unmatched += 1;
            return Ok(None);
        }
    };
    summary.matched += 1;

    if entry.death_date != document_date {
        // Mismatches can originate on either side; never auto-corrected.
        summary.date_mismatches += 1;
        return Ok(Some(Reconciliation {
            outcome: Outcome::DateMismatch,
            person: name,
            entry_date: Some(entry.death_date),
            document_date: Some(document_date),
            url: annotated.doc.url.clone(),
            incoming_links: None,
            citation: None,
        }));
    }

    let (outcome, access_date) = match entry.citation_markup.as_deref() {
        None => (Outcome::Add, today),
        Some(existing) => match citation::classify_existing(existing, policy) {
            ExistingCitation::NytWeb => {
                let inherited = citation::extract_access_date(existing).unwrap_or(today);
                (Outcome::Update, inherited)
            }
            ExistingCitation::TrustedOutlet | ExistingCitation::Other => (Outcome::Keep, today),
            ExistingCitation::ReplaceableNews => (Outcome::Replace, today),
        },
    };

    let built = match outcome {
        Outcome::Keep => None,
        _ => {
            let c = citation::build(&annotated.doc, access_date);
            entry.citation_markup = Some(citation::render(&c));
            Some(c)
        }
    };

    match outcome {
        Outcome::Add => summary.added += 1,
        Outcome::Update => summary.updated += 1,
        Outcome::Replace => summary.replaced += 1,
        Outcome::Keep => summary.kept += 1,
        _ => {}
    }

    Ok(Some(Reconciliation {
        outcome,
        person: name,
        entry_date: Some(entry.death_date),
        document_date: Some(document_date),
        url: annotated.doc.url.clone(),
        incoming_links: None,
        citation: built,
    }))
}
