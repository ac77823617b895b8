//! Site profile: every URL, selector, pattern, timeout, and filter list the scrapers need
//! for one job board. Defaults describe bdjobs.com; a JSON file can override any field.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::browser::WaitUntil;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteProfile {
    /// Listing URL used when no search term is given.
    pub listing_url: String,
    /// Listing URL for a keyword search; `{query}` is replaced by the form-encoded term.
    pub search_url_template: String,
    /// Detail URLs are this prefix followed by the captured parameter blob.
    pub detail_base_url: String,
    pub wait_until: WaitUntil,

    pub listing_selector: String,
    pub listing_attribute: String,
    /// Must capture (parameter blob, title, company) in that order.
    pub listing_pattern: String,
    pub next_page_selector: String,
    /// Visible label the next-page control must contain. Empty accepts the first match.
    pub next_page_label: String,

    pub skills_container_selector: String,
    pub skill_chip_selector: String,
    pub requirements_container_selector: String,
    pub requirement_item_selector: String,

    pub timeouts: Timeouts,
    pub delays: Delays,
    pub requirement_filter: RequirementFilterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    pub navigation_ms: u64,
    pub listing_ms: u64,
    pub section_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Delays {
    pub page_transition_ms: u64,
    pub between_details_ms: u64,
}

/// Requirement lines are kept when they contain any `include_keywords` entry and match
/// none of the `exclude_patterns` (regexes, evaluated on the lowercased line).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RequirementFilterConfig {
    pub include_keywords: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            listing_url: "https://jobs.bdjobs.com/jobsearch.asp?fcatId=8&icatId=".to_string(),
            search_url_template: "https://jobs.bdjobs.com/jobsearch.asp?key={query}".to_string(),
            detail_base_url: "https://jobs.bdjobs.com/jobdetails/?".to_string(),
            wait_until: WaitUntil::DomContentLoaded,
            listing_selector: "div.sout-jobs-wrapper".to_string(),
            listing_attribute: "onclick".to_string(),
            listing_pattern: r"DivOpen\('([^']+)',\d+,'([^']+)','([^']+)'\)".to_string(),
            next_page_selector: "a.prevnext".to_string(),
            next_page_label: "Next »".to_string(),
            skills_container_selector: "#skills".to_string(),
            skill_chip_selector: "#skills button".to_string(),
            requirements_container_selector: "#requirements".to_string(),
            requirement_item_selector: "#requirements li, #requirements p".to_string(),
            timeouts: Timeouts::default(),
            delays: Delays::default(),
            requirement_filter: RequirementFilterConfig::default(),
        }
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            navigation_ms: 60_000,
            listing_ms: 20_000,
            section_ms: 5_000,
        }
    }
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            page_transition_ms: 2_000,
            between_details_ms: 1_000,
        }
    }
}

impl Default for RequirementFilterConfig {
    fn default() -> Self {
        let include = [
            "proficiency",
            "experience with",
            "knowledge of",
            "familiarity with",
            "testing",
            "programming",
            "scripting",
            "language",
            "sql",
            "api",
            "ci/cd",
            "containerization",
            "sdlc",
            "stlc",
            "tools",
            "frameworks",
        ];
        let exclude = [
            r"\bage\b",
            r"\byears?\s+old\b",
            r"\d+\s*\+?\s*(?:(?:-|–|to)\s*\d+\s*)?years?\b",
            r"\byears?\s+of\s+(?:\w+\s+)?experience\b",
        ];
        Self {
            include_keywords: include.iter().map(|s| s.to_string()).collect(),
            exclude_patterns: exclude.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SiteProfile {
    /// Reads a JSON profile; fields absent from the file keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read site profile {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Site profile {} is not valid JSON", path.display()))
    }

    pub fn search_url(&self, search_term: Option<&str>) -> String {
        match search_term.map(str::trim).filter(|t| !t.is_empty()) {
            Some(term) => {
                let query: String = url::form_urlencoded::byte_serialize(term.as_bytes()).collect();
                self.search_url_template.replace("{query}", &query)
            }
            None => self.listing_url.clone(),
        }
    }
}

impl Timeouts {
    pub fn navigation(&self) -> Duration {
        Duration::from_millis(self.navigation_ms)
    }

    pub fn listing(&self) -> Duration {
        Duration::from_millis(self.listing_ms)
    }

    pub fn section(&self) -> Duration {
        Duration::from_millis(self.section_ms)
    }
}

impl Delays {
    pub fn page_transition(&self) -> Duration {
        Duration::from_millis(self.page_transition_ms)
    }

    pub fn between_details(&self) -> Duration {
        Duration::from_millis(self.between_details_ms)
    }
}
