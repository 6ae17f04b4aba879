use serde::Deserialize;

use crate::error::EngineError;

/// Source-precedence and notability policy. All knobs have defaults; a
/// TOML file can override any of them.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    /// Incoming-link count at/above which a person missing from the list
    /// is flagged for notability review.
    #[serde(default = "default_notability_threshold")]
    pub notability_link_threshold: u32,
    /// Outlets whose citations are never displaced by the archive.
    /// Matched as substrings of the existing reference markup.
    #[serde(default = "default_trusted_outlets")]
    pub trusted_outlets: Vec<String>,
    /// Marker identifying an NYT web citation.
    #[serde(default = "default_nyt_domain")]
    pub nyt_domain: String,
    /// Marker identifying a paid death notice, which loses its
    /// update-in-place privilege.
    #[serde(default = "default_paid_notice_marker")]
    pub paid_notice_marker: String,
}

fn default_notability_threshold() -> u32 {
    25
}

fn default_trusted_outlets() -> Vec<String> {
    [
        "theguardian.com",
        "telegraph.co.uk",
        "thetimes.co.uk",
        "independent.co.uk",
        "washingtonpost.com",
        "latimes.com",
        "smh.com.au",
        "irishtimes.com",
        "britannica.com",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

fn default_nyt_domain() -> String {
    "nytimes.com".to_string()
}

fn default_paid_notice_marker() -> String {
    "Paid Notice".to_string()
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            notability_link_threshold: default_notability_threshold(),
            trusted_outlets: default_trusted_outlets(),
            nyt_domain: default_nyt_domain(),
            paid_notice_marker: default_paid_notice_marker(),
        }
    }
}

impl PolicyConfig {
    pub fn from_toml(input: &str) -> Result<Self, EngineError> {
        let config: PolicyConfig =
            toml::from_str(input).map_err(|e| EngineError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.notability_link_threshold == 0 {
            return Err(EngineError::ConfigValidation(
                "notability_link_threshold must be at least 1".into(),
            ));
        }
        if self.nyt_domain.trim().is_empty() {
            return Err(EngineError::ConfigValidation(
                "nyt_domain must not be empty".into(),
            ));
        }
        if self.paid_notice_marker.trim().is_empty() {
            return Err(EngineError::ConfigValidation(
                "paid_notice_marker must not be empty".into(),
            ));
        }
        if self.trusted_outlets.iter().any(|o| o.trim().is_empty()) {
            return Err(EngineError::ConfigValidation(
                "trusted_outlets entries must not be empty".into(),
            ));
        }
        Ok(())
    }
}
