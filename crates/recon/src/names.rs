//! Candidate-name generation for probing Wikipedia article titles.
//!
//! Archive names arrive as `"Surname, Firstname Middle"` (the `persons`
//! keyword) or as the headline portion before its first comma. Both are
//! expanded into an ordered list of plausible full names, most specific
//! first; the caller probes them in order and stops at the first title
//! that exists.

/// Pick the raw name for a document: the `persons` keyword when present,
/// otherwise the headline portion before its first comma. A headline with
/// no comma is unresolved (`None`) — logged by the caller, never fatal.
pub fn raw_name_of(headline: &str, person_keyword: Option<&str>) -> Option<String> {
    if let Some(keyword) = person_keyword {
        let keyword = keyword.trim();
        if !keyword.is_empty() {
            return Some(keyword.to_string());
        }
    }
    headline
        .split_once(',')
        .map(|(before, _)| before.trim().to_string())
}

/// Expand a raw name into ordered, deduplicated candidate full names.
/// Empty for a missing/unparseable input.
pub fn generate(raw_name: Option<&str>) -> Vec<String> {
    let raw = match raw_name {
        Some(r) if !r.trim().is_empty() => r.trim(),
        _ => return Vec::new(),
    };

    let comma = match raw.find(',') {
        // No comma at all: already a full name, just normalize the case.
        None => return vec![title_case_words(raw)],
        Some(pos) => pos,
    };

    // `"SURNAME,"` edge case: comma but no space anywhere.
    if !raw.contains(' ') {
        return vec![title_case_words(&raw.replace(',', ""))];
    }

    let surname = title_case_words(raw[..comma].trim());
    let mut given = raw[comma + 1..].trim().to_string();

    // Peel a generational suffix off the given names.
    let suffix = if given.ends_with(" Jr") {
        given.truncate(given.len() - 3);
        Some("Jr.")
    } else if given.ends_with(" Sr") {
        given.truncate(given.len() - 3);
        Some("Sr.")
    } else {
        None
    };

    let words: Vec<&str> = given.split_whitespace().collect();
    let has_initials = words.iter().any(|w| is_initial(w));

    // Two renderings of the given names: initials dotted, initials bare.
    // Identical when there are no initials.
    let dotted = render_given(&words, true);
    let bare = render_given(&words, false);

    let mut variants = Vec::with_capacity(4);
    for given_form in [&dotted, &bare] {
        for with_suffix in [true, false] {
            if with_suffix && suffix.is_none() {
                continue;
            }
            let mut candidate = format!("{given_form} {surname}");
            if with_suffix {
                candidate.push(' ');
                candidate.push_str(suffix.unwrap_or(""));
            }
            let candidate = candidate.trim().to_string();
            if !variants.contains(&candidate) {
                variants.push(candidate);
            }
        }
        if !has_initials {
            break; // bare rendering would only repeat the dotted one
        }
    }
    variants
}

/// An initial is a single upper-case letter token; it is preserved
/// verbatim by title-casing.
fn is_initial(word: &str) -> bool {
    let mut chars = word.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic() && c.is_uppercase())
}

fn render_given(words: &[&str], dot_initials: bool) -> String {
    let rendered: Vec<String> = words
        .iter()
        .map(|w| {
            if is_initial(w) {
                if dot_initials {
                    format!("{w}.")
                } else {
                    (*w).to_string()
                }
            } else {
                title_case(w)
            }
        })
        .collect();
    rendered.join(" ")
}

/// First letter upper, rest lower — except single-letter upper-case
/// initials, preserved verbatim.
pub fn title_case_words(text: &str) -> String {
    text.split_whitespace()
        .map(|w| {
            if is_initial(w) {
                (*w).to_string()
            } else {
                title_case(w)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_preferred_over_headline() {
        let raw = raw_name_of("PAIK, NAM JUNE, 73, VIDEO ARTIST", Some("Paik, Nam June"));
        assert_eq!(raw.as_deref(), Some("Paik, Nam June"));
    }

    #[test]
    fn headline_prefix_when_no_keyword() {
        let raw = raw_name_of("JOHN DOE, 83, SCULPTOR, DIES", None);
        assert_eq!(raw.as_deref(), Some("JOHN DOE"));
    }

    #[test]
    fn headline_without_comma_is_unresolved() {
        assert_eq!(raw_name_of("A LIFE REMEMBERED", None), None);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(generate(None).is_empty());
        assert!(generate(Some("   ")).is_empty());
    }

    #[test]
    fn no_comma_single_variant() {
        assert_eq!(generate(Some("JOHN DOE")), vec!["John Doe"]);
    }

    #[test]
    fn comma_without_space_edge_case() {
        assert_eq!(generate(Some("SURNAME,")), vec!["Surname"]);
    }

    #[test]
    fn surname_first_reordered() {
        assert_eq!(generate(Some("Paik, Nam June")), vec!["Nam June Paik"]);
    }

    #[test]
    fn initials_expand_dotted_then_bare() {
        assert_eq!(
            generate(Some("Kirk, James T")),
            vec!["James T. Kirk", "James T Kirk"]
        );
    }

    #[test]
    fn suffix_expands_present_then_absent() {
        assert_eq!(
            generate(Some("Davis, Sammy Jr")),
            vec!["Sammy Davis Jr.", "Sammy Davis"]
        );
    }

    #[test]
    fn initials_and_suffix_give_four_variants() {
        assert_eq!(
            generate(Some("Doe, John Q Jr")),
            vec![
                "John Q. Doe Jr.",
                "John Q. Doe",
                "John Q Doe Jr.",
                "John Q Doe",
            ]
        );
    }

    #[test]
    fn lower_case_single_letters_are_not_initials() {
        // "de" particles and lone lower-case letters get title-cased.
        assert_eq!(generate(Some("Gaulle, Charles de")), vec!["Charles De Gaulle"]);
    }

    #[test]
    fn never_returns_duplicates() {
        for raw in ["Doe, John", "Doe, John Q", "Doe, John Jr", "Doe, John Q Jr"] {
            let variants = generate(Some(raw));
            let mut deduped = variants.clone();
            deduped.dedup();
            assert_eq!(variants, deduped, "duplicates for {raw}");
        }
    }

    #[test]
    fn upper_case_name_normalized() {
        assert_eq!(generate(Some("DOE, JOHN")), vec!["John Doe"]);
    }
}
