use std::fmt;

#[derive(Debug)]
pub enum EngineError {
    /// Month or References anchor missing from the article text.
    SectionNotFound(String),
    /// Structural markup assumption violated (space-variant bullet,
    /// missing day anchor, unterminated wikilink). Fatal for the month;
    /// the source article has to be fixed by hand.
    UnsupportedMarkup(String),
    /// Month number outside 1..=12.
    InvalidMonth(u32),
    /// Wiki probe (title existence / backlink count) failed.
    Probe(String),
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Policy config validation error.
    ConfigValidation(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SectionNotFound(anchor) => {
                write!(f, "section anchor not found: {anchor}")
            }
            Self::UnsupportedMarkup(msg) => write!(f, "unsupported markup: {msg}"),
            Self::InvalidMonth(m) => write!(f, "month must be 1..=12, got {m}"),
            Self::Probe(msg) => write!(f, "wiki probe failed: {msg}"),
            Self::ConfigParse(msg) => write!(f, "policy config parse error: {msg}"),
            Self::ConfigValidation(msg) => {
                write!(f, "policy config validation error: {msg}")
            }
        }
    }
}

impl std::error::Error for EngineError {}
