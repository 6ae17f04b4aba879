// Necrolist CLI - deaths-list curation, headless
// Cross-references "Deaths in Month Year" list articles with the NYT
// obituary archive and decides the citation action per person.

mod exit_codes;
mod fetch;
mod report;
mod store;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};

use necrolist_recon::deathdate::Resolver;
use necrolist_recon::{annotate, calendar, names, reconcile, wikilist};
use necrolist_recon::{EngineError, PolicyConfig};

use exit_codes::{
    EXIT_OUTPUT_IO, EXIT_RECON_ATTENTION, EXIT_RECON_MARKUP, EXIT_RECON_SECTION,
    EXIT_RECON_SUBLIST, EXIT_SUCCESS, EXIT_USAGE, EXIT_WIKI_UPSTREAM,
};
use fetch::nytimes::ArchiveClient;
use fetch::wikipedia::WikipediaClient;
use store::CitationStore;

#[derive(Parser)]
#[command(name = "necrolist")]
#[command(about = "Curate wiki deaths lists against the NYT obituary archive")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full month pass: fetch, parse, match, decide, write
    #[command(after_help = "\
Examples:
  necrolist run --month 1 --year 2006 --report january.csv
  necrolist run --month 1 --year 2006 -o updated.txt --db citations.db
  NYT_API_KEY=… necrolist run --month 1 --year 2006 --dry-run")]
    Run {
        /// Month to process (1-12)
        #[arg(long)]
        month: u32,

        /// Year to process
        #[arg(long)]
        year: i32,

        /// NYT Archive API key (falls back to NYT_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Policy TOML overriding precedence/notability defaults
        #[arg(long)]
        policy: Option<PathBuf>,

        /// Write the updated month section here (omit for stdout)
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,

        /// Write the per-entry CSV report here
        #[arg(long)]
        report: Option<PathBuf>,

        /// Citation store path (default: user data dir)
        #[arg(long)]
        db: Option<PathBuf>,

        /// Decide only: write nothing, persist nothing
        #[arg(long)]
        dry_run: bool,

        /// Suppress progress output
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Parse a local wikitext file and print its entries
    Parse {
        /// Path to the saved article wikitext
        file: PathBuf,

        /// Month the article covers (1-12)
        #[arg(long)]
        month: u32,

        /// Year the article covers
        #[arg(long)]
        year: i32,
    },

    /// Preview candidate names for a raw archive name
    #[command(after_help = "\
Examples:
  necrolist names 'Paik, Nam June'
  necrolist names 'Doe, John Q Jr'")]
    Names {
        /// Raw name, `persons`-keyword form
        raw_name: String,
    },

    /// Preview death-date resolution for an excerpt
    #[command(after_help = "\
Examples:
  necrolist resolve-date --published 2006-01-31 --month 1 --year 2006 \\
      'Nam June Paik died Sunday at his winter home.'")]
    ResolveDate {
        /// Publication date, YYYY-MM-DD
        #[arg(long)]
        published: String,

        /// Archive month (1-12)
        #[arg(long)]
        month: u32,

        /// Archive year
        #[arg(long)]
        year: i32,

        /// Lead paragraph or abstract text
        excerpt: String,
    },
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn output(msg: impl Into<String>) -> Self {
        Self { code: EXIT_OUTPUT_IO, message: msg.into(), hint: None }
    }
}

impl From<EngineError> for CliError {
    fn from(err: EngineError) -> Self {
        let code = match &err {
            EngineError::SectionNotFound(_) => EXIT_RECON_SECTION,
            EngineError::UnsupportedMarkup(_) | EngineError::InvalidMonth(_) => EXIT_RECON_MARKUP,
            EngineError::Probe(_) => EXIT_WIKI_UPSTREAM,
            EngineError::ConfigParse(_) | EngineError::ConfigValidation(_) => EXIT_USAGE,
        };
        Self { code, message: err.to_string(), hint: None }
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(err.code)
        }
    }
}

fn run(cli: Cli) -> Result<u8, CliError> {
    match cli.command {
        Commands::Run {
            month,
            year,
            api_key,
            policy,
            out,
            report,
            db,
            dry_run,
            quiet,
        } => cmd_run(month, year, api_key, policy, out, report, db, dry_run, quiet),
        Commands::Parse { file, month, year } => cmd_parse(file, month, year),
        Commands::Names { raw_name } => cmd_names(raw_name),
        Commands::ResolveDate { published, month, year, excerpt } => {
            cmd_resolve_date(published, month, year, excerpt)
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_run(
    month: u32,
    year: i32,
    api_key: Option<String>,
    policy_path: Option<PathBuf>,
    out: Option<PathBuf>,
    report_path: Option<PathBuf>,
    db: Option<PathBuf>,
    dry_run: bool,
    quiet: bool,
) -> Result<u8, CliError> {
    validate_month(month)?;
    let policy = load_policy(policy_path)?;
    let api_key = fetch::common::resolve_api_key(
        api_key,
        "NYT Archive",
        "NYT_API_KEY",
        exit_codes::EXIT_ARCHIVE_NOT_AUTH,
    )?;

    let wiki = WikipediaClient::new();
    let archive = ArchiveClient::new();
    let title = format!("Deaths in {} {}", calendar::month_name(month), year);

    if !quiet {
        eprintln!("Fetching {title}...");
    }
    let wikitext = wiki.fetch_raw_wikitext(&title)?;

    let parsed = wikilist::parse(&wikitext, month, year)?;
    for name in &parsed.duplicate_names {
        eprintln!("warning: duplicate entry in {title}: {name}");
    }
    if parsed.contains_sublist {
        eprintln!("warning: {title} contains a sub-list; skipping until it is edited by hand");
        return Ok(EXIT_RECON_SUBLIST);
    }
    if !quiet {
        eprintln!("Parsed {} entries", parsed.entries.len());
    }

    if !quiet {
        eprintln!("Fetching archive month {year}-{month:02}...");
    }
    let documents = archive.fetch_archive_month(year, month, &api_key)?;
    if !quiet {
        eprintln!("{} obituary documents", documents.len());
    }

    let annotated = annotate(documents, &Resolver::new(), month, year);
    if !quiet {
        let undated = annotated
            .iter()
            .filter(|d| d.resolved_death_date.is_none())
            .count();
        let unnamed = annotated
            .iter()
            .filter(|d| d.candidate_names.is_empty())
            .count();
        if undated > 0 {
            eprintln!("warning: no death date resolved for {undated} documents");
        }
        if unnamed > 0 {
            eprintln!("warning: no usable name for {unnamed} documents");
        }
    }
    let today = Utc::now().date_naive();
    let result = reconcile(
        parsed.entries,
        &annotated,
        &wiki,
        &policy,
        today,
        month,
        year,
    )?;

    if !quiet {
        let s = &result.summary;
        eprintln!(
            "{} documents, {} dated in-month, {} matched, {} unmatched",
            s.documents, s.dated, s.matched, s.unmatched,
        );
        eprintln!(
            "add {}, update {}, replace {}, keep {}, date mismatch {}, review {}",
            s.added, s.updated, s.replaced, s.kept, s.date_mismatches, s.review_needed,
        );
    }

    if !dry_run {
        let section = wikilist::render_month(&result.entries, month, year);
        match &out {
            Some(path) => {
                std::fs::write(path, section).map_err(|e| {
                    CliError::output(format!("cannot write {}: {}", path.display(), e))
                })?;
                if !quiet {
                    eprintln!("Updated section written to {}", path.display());
                }
            }
            None => print!("{section}"),
        }

        if report_path.is_some() {
            let label = report::write_report(&result.records, &report_path)?;
            if !quiet {
                eprintln!("Report written to {label}");
            }
        }

        let citations: Vec<_> = result
            .records
            .iter()
            .filter_map(|r| r.citation.clone().map(|c| (r.person.clone(), c)))
            .collect();
        if !citations.is_empty() {
            let path = db.unwrap_or_else(CitationStore::default_path);
            let mut store = CitationStore::open(&path)?;
            let n = store.save_all(&citations)?;
            if !quiet {
                eprintln!("Saved {} citations to {}", n, path.display());
            }
        }
    }

    if result.summary.date_mismatches + result.summary.review_needed > 0 {
        Ok(EXIT_RECON_ATTENTION)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

fn cmd_parse(file: PathBuf, month: u32, year: i32) -> Result<u8, CliError> {
    validate_month(month)?;
    let wikitext = std::fs::read_to_string(&file)
        .map_err(|e| CliError::usage(format!("cannot read {}: {}", file.display(), e)))?;
    let parsed = wikilist::parse(&wikitext, month, year)?;

    for entry in &parsed.entries {
        let cited = if entry.citation_markup.is_some() { "cited" } else { "uncited" };
        println!(
            "{}  {}  [{}]  {}",
            entry.death_date, entry.linked_name, cited, entry.information,
        );
    }
    for name in &parsed.duplicate_names {
        eprintln!("warning: duplicate entry: {name}");
    }
    if parsed.contains_sublist {
        eprintln!("warning: article contains a sub-list");
        return Ok(EXIT_RECON_SUBLIST);
    }
    Ok(EXIT_SUCCESS)
}

fn cmd_names(raw_name: String) -> Result<u8, CliError> {
    let variants = names::generate(Some(&raw_name));
    if variants.is_empty() {
        eprintln!("no candidates for {raw_name:?}");
        return Ok(EXIT_SUCCESS);
    }
    for variant in variants {
        println!("{variant}");
    }
    Ok(EXIT_SUCCESS)
}

fn cmd_resolve_date(
    published: String,
    month: u32,
    year: i32,
    excerpt: String,
) -> Result<u8, CliError> {
    validate_month(month)?;
    let publication_date = NaiveDate::parse_from_str(&published, "%Y-%m-%d")
        .map_err(|e| CliError::usage(format!("invalid --published date {published:?}: {e}")))?;
    let resolver = Resolver::new();
    match resolver.resolve(publication_date, month, year, Some(&excerpt), None) {
        Some(date) => println!("{date}"),
        None => println!("unresolved"),
    }
    Ok(EXIT_SUCCESS)
}

fn validate_month(month: u32) -> Result<(), CliError> {
    if !(1..=12).contains(&month) {
        return Err(CliError::usage(format!("--month must be 1..=12, got {month}")));
    }
    Ok(())
}

fn load_policy(path: Option<PathBuf>) -> Result<PolicyConfig, CliError> {
    match path {
        None => Ok(PolicyConfig::default()),
        Some(path) => {
            let text = std::fs::read_to_string(&path).map_err(|e| {
                CliError::usage(format!("cannot read policy {}: {}", path.display(), e))
            })?;
            Ok(PolicyConfig::from_toml(&text)?)
        }
    }
}
