//! Parser for "Deaths in Month Year" list articles.
//!
//! The grammar is small but hand-edited: section anchors `==Month Year==`,
//! day anchors `===D===` (both tolerating one inner space), bullet entries
//! `*[[Target|Display]], blurb<ref>…</ref>`. Newlines carry no meaning and
//! are stripped before scanning.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use crate::calendar;
use crate::error::EngineError;
use crate::model::Entry;

/// Parse result for one month's article.
#[derive(Debug)]
pub struct ParsedMonth {
    pub entries: Vec<Entry>,
    /// A nested `**[[` bullet was seen. Policy signal, not a parse error:
    /// the caller skips list-level processing until a human edits the
    /// article.
    pub contains_sublist: bool,
    /// Linked names appearing under more than one bullet. Data-quality
    /// defect to surface, never silently merged.
    pub duplicate_names: Vec<String>,
}

/// Parse the month section of a list article into entries.
pub fn parse(wikitext: &str, month: u32, year: i32) -> Result<ParsedMonth, EngineError> {
    if !(1..=12).contains(&month) {
        return Err(EngineError::InvalidMonth(month));
    }
    let month_name = calendar::month_name(month);

    // Line-insensitive grammar: drop newlines up front.
    let flat: String = wikitext.chars().filter(|c| *c != '\n' && *c != '\r').collect();

    let open_plain = format!("=={month_name} {year}==");
    let open_spaced = format!("== {month_name} {year} ==");
    let (open_pos, open_len) = find_first(&flat, &[&open_plain, &open_spaced])
        .ok_or_else(|| EngineError::SectionNotFound(open_plain.clone()))?;

    let after_open = &flat[open_pos + open_len..];
    let (close_pos, _) = find_first(after_open, &["==References==", "== References =="])
        .ok_or_else(|| EngineError::SectionNotFound("==References==".to_string()))?;
    let body = &after_open[..close_pos];

    if body.contains("* [[") {
        return Err(EngineError::UnsupportedMarkup(
            "space-variant bullet `* [[` — fix the source article".to_string(),
        ));
    }
    let contains_sublist = body.contains("**[[");

    // Locate every day anchor in order; content for day D runs to day
    // D+1's anchor (or the end of the body for the last day).
    let days = calendar::days_in_month(year, month);
    let mut anchors: Vec<(usize, usize)> = Vec::with_capacity(days as usize);
    let mut cursor = 0usize;
    for day in 1..=days {
        let plain = format!("==={day}===");
        let spaced = format!("=== {day} ===");
        let (pos, len) = find_first(&body[cursor..], &[&plain, &spaced])
            .ok_or_else(|| EngineError::UnsupportedMarkup(format!("missing day anchor {plain}")))?;
        let abs = cursor + pos;
        anchors.push((abs, abs + len));
        cursor = abs + len;
    }

    let mut entries = Vec::new();
    for (i, &(_, content_start)) in anchors.iter().enumerate() {
        let content_end = anchors.get(i + 1).map(|&(a, _)| a).unwrap_or(body.len());
        let date = NaiveDate::from_ymd_opt(year, month, i as u32 + 1)
            .ok_or(EngineError::InvalidMonth(month))?;
        parse_day(&body[content_start..content_end], date, &mut entries)?;
    }

    let mut seen = BTreeSet::new();
    let mut duplicates = BTreeSet::new();
    for entry in &entries {
        if !seen.insert(entry.linked_name.clone()) {
            duplicates.insert(entry.linked_name.clone());
        }
    }

    Ok(ParsedMonth {
        entries,
        contains_sublist,
        duplicate_names: duplicates.into_iter().collect(),
    })
}

/// Render entries back into a month section, one day anchor per day and
/// one bullet per entry. Inverse of [`parse`] up to whitespace.
pub fn render_month(entries: &[Entry], month: u32, year: i32) -> String {
    let mut text = format!("=={} {}==\n", calendar::month_name(month), year);
    for day in 1..=calendar::days_in_month(year, month) {
        text.push_str(&format!("==={day}===\n"));
        for entry in entries.iter().filter(|e| e.death_date.day() == day) {
            if entry.name == entry.linked_name {
                text.push_str(&format!("*[[{}]]", entry.linked_name));
            } else {
                text.push_str(&format!("*[[{}|{}]]", entry.linked_name, entry.name));
            }
            if !entry.information.is_empty() {
                text.push_str(", ");
                text.push_str(&entry.information);
            }
            if let Some(markup) = &entry.citation_markup {
                text.push_str(markup);
            }
            text.push('\n');
        }
    }
    text.push_str("==References==\n{{Reflist}}\n");
    text
}

/// Earliest occurrence of any needle variant: `(position, needle length)`.
fn find_first(haystack: &str, needles: &[&str]) -> Option<(usize, usize)> {
    needles
        .iter()
        .filter_map(|n| haystack.find(n).map(|p| (p, n.len())))
        .min_by_key(|&(p, _)| p)
}

fn parse_day(content: &str, date: NaiveDate, entries: &mut Vec<Entry>) -> Result<(), EngineError> {
    let mut fragments = content.split("*[[");
    // Text before the first bullet is day-section preamble; ignore it.
    let _ = fragments.next();
    for fragment in fragments {
        entries.push(parse_fragment(fragment, date)?);
    }
    Ok(())
}

/// One raw entry: `Target|Display]], blurb<ref>…</ref>` (already past the
/// `*[[` delimiter).
fn parse_fragment(fragment: &str, death_date: NaiveDate) -> Result<Entry, EngineError> {
    let link_end = fragment.find("]]").ok_or_else(|| {
        EngineError::UnsupportedMarkup(format!(
            "unterminated wikilink near `{}`",
            &fragment[..fragment.len().min(40)]
        ))
    })?;
    let link = &fragment[..link_end];
    let rest = &fragment[link_end + 2..];

    let (linked_name, name) = match link.split_once('|') {
        Some((target, display)) => (target.trim().to_string(), display.trim().to_string()),
        None => (link.trim().to_string(), link.trim().to_string()),
    };

    // The blurb stops at the first inline reference; `<ref` also covers
    // named refs (`<ref name=…>`).
    let (info_raw, citation_markup) = match rest.find("<ref") {
        Some(pos) => (&rest[..pos], Some(rest[pos..].to_string())),
        None => (rest, None),
    };

    let info = info_raw.trim();
    let info = info.strip_prefix(',').unwrap_or(info).trim();

    Ok(Entry {
        name,
        linked_name,
        information: info.to_string(),
        citation_markup,
        death_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a January 2006 article with all 31 day anchors and the given
    /// entry fragments placed under their days.
    fn january_2006(entries_by_day: &[(u32, &str)]) -> String {
        let mut text = String::from("Intro boilerplate.\n==January 2006==\n");
        for day in 1..=31 {
            text.push_str(&format!("==={day}===\n"));
            for (d, entry) in entries_by_day {
                if *d == day {
                    text.push_str(entry);
                    text.push('\n');
                }
            }
        }
        text.push_str("==References==\n{{Reflist}}\n");
        text
    }

    #[test]
    fn piped_wikilink_entry() {
        let text = january_2006(&[(
            3,
            "*[[Elton John|Sir Elton John]], singer<ref>{{cite news |title=x}}</ref>",
        )]);
        let parsed = parse(&text, 1, 2006).unwrap();
        assert_eq!(parsed.entries.len(), 1);
        let e = &parsed.entries[0];
        assert_eq!(e.linked_name, "Elton John");
        assert_eq!(e.name, "Sir Elton John");
        assert_eq!(e.information, "singer");
        assert!(e.citation_markup.as_deref().unwrap().starts_with("<ref>"));
        assert_eq!(e.death_date, NaiveDate::from_ymd_opt(2006, 1, 3).unwrap());
    }

    #[test]
    fn plain_wikilink_without_citation() {
        let text = january_2006(&[(29, "*[[Nam June Paik]], video artist.")]);
        let parsed = parse(&text, 1, 2006).unwrap();
        let e = &parsed.entries[0];
        assert_eq!(e.linked_name, "Nam June Paik");
        assert_eq!(e.name, "Nam June Paik");
        assert_eq!(e.information, "video artist.");
        assert!(e.citation_markup.is_none());
        assert_eq!(e.death_date, NaiveDate::from_ymd_opt(2006, 1, 29).unwrap());
    }

    #[test]
    fn entries_belong_to_their_day_anchor() {
        let text = january_2006(&[
            (1, "*[[Person One]], first."),
            (1, "*[[Person Two]], second."),
            (31, "*[[Person Three]], third."),
        ]);
        let parsed = parse(&text, 1, 2006).unwrap();
        assert_eq!(parsed.entries.len(), 3);
        assert_eq!(parsed.entries[0].death_date.day(), 1);
        assert_eq!(parsed.entries[1].death_date.day(), 1);
        assert_eq!(parsed.entries[2].death_date.day(), 31);
    }

    #[test]
    fn spaced_section_and_day_anchors_accepted() {
        let mut text = String::from("== January 2006 ==\n");
        for day in 1..=31 {
            text.push_str(&format!("=== {day} ===\n"));
        }
        text.push_str("*[[Someone]], tail entry under day 31.\n== References ==\n");
        let parsed = parse(&text, 1, 2006).unwrap();
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.entries[0].death_date.day(), 31);
    }

    #[test]
    fn space_variant_bullet_is_unsupported() {
        let text = january_2006(&[(2, "* [[Broken Entry]], oops.")]);
        let err = parse(&text, 1, 2006).unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedMarkup(_)));
    }

    #[test]
    fn sublist_is_flagged_not_fatal() {
        let text = january_2006(&[
            (4, "*[[Parent Entry]], head of list."),
            (4, "**[[Nested Entry]], child."),
        ]);
        let parsed = parse(&text, 1, 2006).unwrap();
        assert!(parsed.contains_sublist);
    }

    #[test]
    fn duplicate_linked_names_surface() {
        let text = january_2006(&[
            (5, "*[[Repeated Name]], once."),
            (9, "*[[Repeated Name]], twice."),
        ]);
        let parsed = parse(&text, 1, 2006).unwrap();
        assert_eq!(parsed.entries.len(), 2);
        assert_eq!(parsed.duplicate_names, vec!["Repeated Name".to_string()]);
    }

    #[test]
    fn missing_month_anchor() {
        let err = parse("==February 2006==\n==References==", 1, 2006).unwrap_err();
        match err {
            EngineError::SectionNotFound(anchor) => {
                assert_eq!(anchor, "==January 2006==");
            }
            other => panic!("expected SectionNotFound, got {other:?}"),
        }
    }

    #[test]
    fn missing_references_anchor() {
        let err = parse("==January 2006==\n===1===\n", 1, 2006).unwrap_err();
        assert!(matches!(err, EngineError::SectionNotFound(_)));
    }

    #[test]
    fn missing_day_anchor_is_unsupported() {
        // Day anchors 2..=31 absent.
        let text = "==January 2006==\n===1===\n*[[Only Person]], here.\n==References==\n";
        let err = parse(text, 1, 2006).unwrap_err();
        match err {
            EngineError::UnsupportedMarkup(msg) => assert!(msg.contains("===2===")),
            other => panic!("expected UnsupportedMarkup, got {other:?}"),
        }
    }

    #[test]
    fn named_ref_captured_as_citation() {
        let text = january_2006(&[(
            7,
            "*[[Cited Person]], blurb<ref name=\"nyt\">{{cite web |url=x}}</ref>",
        )]);
        let parsed = parse(&text, 1, 2006).unwrap();
        let e = &parsed.entries[0];
        assert_eq!(e.information, "blurb");
        assert!(e
            .citation_markup
            .as_deref()
            .unwrap()
            .starts_with("<ref name=\"nyt\">"));
    }

    #[test]
    fn render_parse_round_trip() {
        let text = january_2006(&[
            (3, "*[[Elton John|Sir Elton John]], singer<ref>{{cite news |title=x}}</ref>"),
            (29, "*[[Nam June Paik]], video artist."),
        ]);
        let parsed = parse(&text, 1, 2006).unwrap();
        let rendered = render_month(&parsed.entries, 1, 2006);
        let reparsed = parse(&rendered, 1, 2006).unwrap();
        assert_eq!(parsed.entries, reparsed.entries);
    }

    #[test]
    fn rejects_invalid_month() {
        assert!(matches!(
            parse("==January 2006==\n==References==", 13, 2006),
            Err(EngineError::InvalidMonth(13))
        ));
    }
}
