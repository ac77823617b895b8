//! Job detail extraction: listed skill chips and technical requirement lines.
//!
//! Skills and requirements are extracted independently and best-effort: a missing
//! section or a timeout yields an empty list, never an error.

use std::time::Duration;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::browser::{BrowserError, BrowserPage};
use crate::scraping::site::{RequirementFilterConfig, SiteProfile};
use crate::scraping::{dedup_preserving_order, ScrapeError};

/// Keeps technical requirement lines, drops eligibility boilerplate (age, years of service).
#[derive(Debug, Clone)]
pub struct RequirementFilter {
    include: Vec<String>,
    exclude: Vec<Regex>,
}

impl RequirementFilter {
    pub fn new(config: &RequirementFilterConfig) -> Result<Self, ScrapeError> {
        let exclude = config
            .exclude_patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| ScrapeError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            include: config
                .include_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
            exclude,
        })
    }

    pub fn keeps(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        self.include.iter().any(|k| lower.contains(k.as_str()))
            && !self.exclude.iter().any(|re| re.is_match(&lower))
    }
}

/// What one detail page yielded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailSections {
    pub skills: Vec<String>,
    pub requirements: Vec<String>,
}

pub struct JobDetailScraper {
    site: SiteProfile,
    filter: RequirementFilter,
}

impl JobDetailScraper {
    pub fn new(site: SiteProfile) -> Result<Self, ScrapeError> {
        let filter = RequirementFilter::new(&site.requirement_filter)?;
        Ok(Self { site, filter })
    }

    /// Pause inserted between consecutive detail fetches.
    pub fn politeness_delay(&self) -> Duration {
        self.site.delays.between_details()
    }

    pub async fn fetch(&self, page: &mut dyn BrowserPage, job_url: &str) -> DetailSections {
        if let Err(e) = page
            .navigate(job_url, self.site.wait_until, self.site.timeouts.navigation())
            .await
        {
            warn!("Could not open job details {job_url}: {e}");
            return DetailSections::default();
        }

        let skills = match self.extract_skills(page).await {
            Ok(skills) => skills,
            Err(e) => {
                info!("No skills found for {job_url}: {e}");
                Vec::new()
            }
        };

        let requirements = match self.extract_requirements(page).await {
            Ok(requirements) => requirements,
            Err(e) => {
                info!("No requirements found for {job_url}: {e}");
                Vec::new()
            }
        };

        debug!(
            "{job_url}: {} skill(s), {} requirement(s)",
            skills.len(),
            requirements.len()
        );

        DetailSections {
            skills: dedup_preserving_order(skills),
            requirements: dedup_preserving_order(requirements),
        }
    }

    async fn extract_skills(&self, page: &dyn BrowserPage) -> Result<Vec<String>, BrowserError> {
        page.wait_for_selector(&self.site.skills_container_selector, self.site.timeouts.section())
            .await?;
        let chips = page.query_selector_all(&self.site.skill_chip_selector).await?;
        Ok(non_empty_trimmed(chips.iter().map(|c| c.inner_text())))
    }

    async fn extract_requirements(
        &self,
        page: &dyn BrowserPage,
    ) -> Result<Vec<String>, BrowserError> {
        let container = &self.site.requirements_container_selector;
        page.wait_for_selector(container, self.site.timeouts.section())
            .await?;

        let items = page
            .query_selector_all(&self.site.requirement_item_selector)
            .await?;
        let mut lines = non_empty_trimmed(items.iter().map(|el| el.inner_text()));

        // no bullet structure: fall back to the section's text, one line per requirement
        if lines.is_empty() {
            if let Some(section) = page.query_selector_all(container).await?.first() {
                lines = non_empty_trimmed(section.inner_text().lines());
            }
        }

        Ok(lines.into_iter().filter(|l| self.filter.keeps(l)).collect())
    }
}

fn non_empty_trimmed<'a>(texts: impl Iterator<Item = &'a str>) -> Vec<String> {
    texts
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}
