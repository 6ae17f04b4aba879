//! Death-date resolution from obituary prose.
//!
//! Three layered strategies, most specific first: an explicit month
//! mention ("died Jan. 2"), a day-of-week mention ("died Sunday"), and a
//! relative-day expression ("died yesterday"). Each strategy tries the
//! lead paragraph, then the abstract, before the next strategy runs, so
//! an explicit date anywhere beats a relative expression about someone
//! else. Absence of a date is a normal outcome, never an error.
//!
//! The keyword set `died|dead|killed` (case-sensitive) and the
//! 60-character lookahead window are load-bearing: widening either
//! changes matching behavior silently.

use chrono::NaiveDate;
use regex::Regex;

use crate::calendar;

const KEYWORDS: &str = "died|dead|killed";
const RELATIVE_EXPRESSIONS: [&str; 5] = [
    "yesterday",
    "today",
    "this morning",
    "this afternoon",
    "this evening",
];

/// Compiled patterns over the fixed keyword/month/day alphabet.
pub struct Resolver {
    months: Vec<Regex>,
    weekdays: Vec<Regex>,
    relatives: Vec<Regex>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    pub fn new() -> Self {
        let compile = |token: &str| {
            Regex::new(&format!("(?:{KEYWORDS}).{{0,60}}?{token}"))
                .expect("static pattern compiles")
        };
        Self {
            months: calendar::MONTH_ABBREVIATIONS
                .iter()
                .map(|m| compile(m))
                .collect(),
            weekdays: calendar::DAY_NAMES.iter().map(|d| compile(d)).collect(),
            relatives: RELATIVE_EXPRESSIONS.iter().map(|r| compile(r)).collect(),
        }
    }

    /// Resolve the most likely death date for a document published on
    /// `publication_date` in archive month `month_id`/`year`. `None` when
    /// no strategy succeeds.
    pub fn resolve(
        &self,
        publication_date: NaiveDate,
        month_id: u32,
        year: i32,
        lead_paragraph: Option<&str>,
        abstract_text: Option<&str>,
    ) -> Option<NaiveDate> {
        let excerpts = [lead_paragraph, abstract_text];

        for text in excerpts.iter().flatten() {
            if let Some(date) = self.explicit_month(text, month_id, year) {
                return Some(date);
            }
        }
        for text in excerpts.iter().flatten() {
            if let Some(date) = self.weekday_mention(text, publication_date) {
                return Some(date);
            }
        }
        for text in excerpts.iter().flatten() {
            if let Some(date) = self.relative_expression(text, publication_date) {
                return Some(date);
            }
        }
        None
    }

    /// Strategy 1: "died <Mon> <day>". The window covers the six most
    /// recent months ending at the archive month (an obituary published
    /// in month M may report a death from the preceding half year),
    /// searched most recent first.
    fn explicit_month(&self, text: &str, month_id: u32, year: i32) -> Option<NaiveDate> {
        for back in 0..6u32 {
            let month = (month_id + 11 - back) % 12 + 1;
            let matched = match self.months[month as usize - 1].find(text) {
                Some(m) => m,
                None => continue,
            };

            // Day token: optional period glued to the month abbreviation,
            // then a single space, then the integer up to the next space
            // (trailing period discarded). A non-integer token abandons
            // this excerpt — another excerpt or strategy may still hit.
            let rest = &text[matched.end()..];
            let rest = rest.strip_prefix('.').unwrap_or(rest);
            let rest = rest.strip_prefix(' ')?;
            let token = rest.split(' ').next().unwrap_or("");
            let day: u32 = token.trim_end_matches('.').parse().ok()?;

            // Oct/Nov/Dec mentioned in a Jan-Mar archive month wraps into
            // the prior year. Empirically tuned rule; preserved as is.
            let resolved_year = if (10..=12).contains(&month) && month_id <= 3 {
                year - 1
            } else {
                year
            };
            return NaiveDate::from_ymd_opt(resolved_year, month, day);
        }
        None
    }

    /// Strategy 2: "died <DayName>". Walk backward from the day before
    /// publication until the weekday matches; seven distinct day names
    /// guarantee convergence within seven steps.
    fn weekday_mention(&self, text: &str, publication_date: NaiveDate) -> Option<NaiveDate> {
        for (i, pattern) in self.weekdays.iter().enumerate() {
            if pattern.find(text).is_none() {
                continue;
            }
            let mut date = publication_date.pred_opt()?;
            for _ in 0..7 {
                if calendar::weekday_name(date) == calendar::DAY_NAMES[i] {
                    return Some(date);
                }
                date = date.pred_opt()?;
            }
            unreachable!("weekday walk did not converge within 7 days");
        }
        None
    }

    /// Strategy 3: "died yesterday" / same-day expressions.
    fn relative_expression(&self, text: &str, publication_date: NaiveDate) -> Option<NaiveDate> {
        for (i, pattern) in self.relatives.iter().enumerate() {
            if pattern.find(text).is_none() {
                continue;
            }
            return if RELATIVE_EXPRESSIONS[i] == "yesterday" {
                publication_date.pred_opt()
            } else {
                Some(publication_date)
            };
        }
        None
    }
}
