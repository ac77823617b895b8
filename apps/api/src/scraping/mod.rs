//! Job-board scraping: the paginated listing walk and the per-job detail extraction.
//!
//! Both scrapers are built once from a `SiteProfile` and hold no per-run state; the
//! seen-URL set and accumulators live inside each call.

use std::collections::HashSet;

use thiserror::Error;

use crate::browser::BrowserError;

pub mod detail;
pub mod listing;
pub mod site;

pub use detail::{JobDetailScraper, RequirementFilter};
pub use listing::JobListingScraper;
pub use site::SiteProfile;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("listing page {url} is unusable: {source}")]
    ListingUnavailable {
        url: String,
        #[source]
        source: BrowserError,
    },

    #[error("invalid pattern `{pattern}` in site profile: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Removes duplicates, keeping the first occurrence of each item in place.
pub fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_first_occurrence_order() {
        let items = vec!["sql".to_string(), "api".to_string(), "sql".to_string()];
        assert_eq!(dedup_preserving_order(items), vec!["sql", "api"]);
    }

    #[test]
    fn test_dedup_empty() {
        assert!(dedup_preserving_order(vec![]).is_empty());
    }
}
