//! `necrolist-recon` — deaths-list reconciliation engine.
//!
//! Pure engine crate: receives pre-fetched list wikitext and pre-loaded
//! archive documents, returns classified per-person results.
//! No CLI or network dependencies — the wiki-side probes the reconciler
//! needs are a trait the caller implements.

pub mod calendar;
pub mod citation;
pub mod config;
pub mod deathdate;
pub mod error;
pub mod model;
pub mod names;
pub mod reconcile;
pub mod wikilist;

pub use config::PolicyConfig;
pub use error::EngineError;
pub use model::{
    AnnotatedDocument, Citation, Entry, MonthReport, ObituaryDocument, Outcome, ReconSummary,
    Reconciliation,
};
pub use reconcile::{annotate, reconcile, WikiProbe};
pub use wikilist::ParsedMonth;
