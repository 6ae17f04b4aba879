//! SQLite-backed citation store: the rendered citations for each article
//! title, queryable across runs.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rusqlite::{params, Connection};

use necrolist_recon::Citation;

use crate::exit_codes;
use crate::CliError;

pub struct CitationStore {
    conn: Connection,
}

impl CitationStore {
    /// Open (creating the schema if needed) the store at `path`.
    pub fn open(path: &Path) -> Result<Self, CliError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                store_err(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }
        let conn = Connection::open(path)
            .map_err(|e| store_err(format!("cannot open {}: {}", path.display(), e)))?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS citations (
                 id            INTEGER PRIMARY KEY,
                 article_title TEXT NOT NULL,
                 author        TEXT NOT NULL DEFAULT '',
                 title         TEXT NOT NULL DEFAULT '',
                 url           TEXT NOT NULL DEFAULT '',
                 work          TEXT NOT NULL DEFAULT '',
                 page          TEXT NOT NULL DEFAULT '',
                 access_date   TEXT,
                 date          TEXT
             );
             CREATE INDEX IF NOT EXISTS idx_citations_article
                 ON citations(article_title);",
        )
        .map_err(|e| store_err(format!("cannot migrate citation store: {e}")))?;
        Ok(Self { conn })
    }

    /// Default location under the user data dir.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("necrolist")
            .join("citations.db")
    }

    /// Persist citations in one transaction: `(article title, citation)`
    /// pairs. Returns the number of rows written.
    pub fn save_all(&mut self, items: &[(String, Citation)]) -> Result<usize, CliError> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| store_err(format!("cannot begin transaction: {e}")))?;
        for (article_title, citation) in items {
            tx.execute(
                "INSERT INTO citations
                     (article_title, author, title, url, work, page, access_date, date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    article_title,
                    citation.author,
                    citation.title,
                    citation.url,
                    citation.work,
                    citation.page,
                    citation.access_date.map(|d| d.to_string()),
                    citation.date.map(|d| d.to_string()),
                ],
            )
            .map_err(|e| store_err(format!("cannot save citation: {e}")))?;
        }
        tx.commit()
            .map_err(|e| store_err(format!("cannot commit: {e}")))?;
        Ok(items.len())
    }

    pub fn find_by_article_title(&self, article_title: &str) -> Result<Vec<Citation>, CliError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT author, title, url, work, page, access_date, date
                 FROM citations WHERE article_title = ?1 ORDER BY id",
            )
            .map_err(|e| store_err(format!("cannot query citation store: {e}")))?;
        let rows = stmt
            .query_map([article_title], |row| {
                Ok(Citation {
                    author: row.get(0)?,
                    title: row.get(1)?,
                    url: row.get(2)?,
                    work: row.get(3)?,
                    page: row.get(4)?,
                    access_date: parse_stored_date(row.get::<_, Option<String>>(5)?),
                    date: parse_stored_date(row.get::<_, Option<String>>(6)?),
                    ..Citation::default()
                })
            })
            .map_err(|e| store_err(format!("cannot query citation store: {e}")))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| store_err(format!("cannot read citation row: {e}")))
    }
}

fn parse_stored_date(value: Option<String>) -> Option<NaiveDate> {
    value.and_then(|v| NaiveDate::parse_from_str(&v, "%Y-%m-%d").ok())
}

fn store_err(message: String) -> CliError {
    CliError {
        code: exit_codes::EXIT_STORE,
        message,
        hint: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn citation() -> Citation {
        Citation {
            author: "Roberta Smith".to_string(),
            title: "Nam June Paik, 73, Dies; Pioneer of Video Art".to_string(),
            url: "https://www.nytimes.com/2006/01/31/arts/design/paik.html".to_string(),
            work: "The New York Times".to_string(),
            page: "B7".to_string(),
            access_date: NaiveDate::from_ymd_opt(2006, 2, 2),
            date: NaiveDate::from_ymd_opt(2006, 1, 31),
            ..Citation::default()
        }
    }

    #[test]
    fn save_and_find_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CitationStore::open(&dir.path().join("citations.db")).unwrap();

        let n = store
            .save_all(&[("Nam June Paik".to_string(), citation())])
            .unwrap();
        assert_eq!(n, 1);

        let found = store.find_by_article_title("Nam June Paik").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].author, "Roberta Smith");
        assert_eq!(found[0].access_date, NaiveDate::from_ymd_opt(2006, 2, 2));
        assert_eq!(found[0].date, NaiveDate::from_ymd_opt(2006, 1, 31));
    }

    #[test]
    fn find_unknown_title_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = CitationStore::open(&dir.path().join("citations.db")).unwrap();
        assert!(store.find_by_article_title("Nobody").unwrap().is_empty());
    }

    #[test]
    fn reopen_preserves_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("citations.db");
        {
            let mut store = CitationStore::open(&path).unwrap();
            store
                .save_all(&[("Nam June Paik".to_string(), citation())])
                .unwrap();
        }
        let store = CitationStore::open(&path).unwrap();
        assert_eq!(store.find_by_article_title("Nam June Paik").unwrap().len(), 1);
    }
}
