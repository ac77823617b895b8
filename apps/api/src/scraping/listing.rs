//! Paginated listing walk.
//!
//! ListingPage → wait for container → extract stubs → decide:
//! - zero new stubs on this page (stall), no next-page control, or `max_jobs` reached → stop;
//! - otherwise click next, pause, and loop.
//!
//! A browser failure before anything was collected surfaces as `ListingUnavailable`.
//! A failure after that ends the walk and returns what was collected.

use std::collections::HashSet;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::browser::{BrowserError, BrowserPage, ElementHandle};
use crate::models::job::JobStub;
use crate::scraping::site::SiteProfile;
use crate::scraping::ScrapeError;

pub struct JobListingScraper {
    site: SiteProfile,
    pattern: Regex,
}

impl JobListingScraper {
    pub fn new(site: SiteProfile) -> Result<Self, ScrapeError> {
        let pattern = Regex::new(&site.listing_pattern).map_err(|source| {
            ScrapeError::InvalidPattern {
                pattern: site.listing_pattern.clone(),
                source,
            }
        })?;
        Ok(Self { site, pattern })
    }

    pub fn site(&self) -> &SiteProfile {
        &self.site
    }

    /// Collects up to `max_jobs` unique stubs in discovery order.
    pub async fn collect(
        &self,
        page: &mut dyn BrowserPage,
        search_term: Option<&str>,
        max_jobs: usize,
    ) -> Result<Vec<JobStub>, ScrapeError> {
        let url = self.site.search_url(search_term);
        let mut stubs = Vec::new();
        if max_jobs == 0 {
            return Ok(stubs);
        }

        info!("Collecting up to {max_jobs} jobs from {url}");
        match self.walk(page, &url, max_jobs, &mut stubs).await {
            Ok(pages) => {
                info!("Collected {} jobs across {pages} listing page(s)", stubs.len());
                Ok(stubs)
            }
            Err(source) if stubs.is_empty() => Err(ScrapeError::ListingUnavailable { url, source }),
            Err(e) => {
                warn!(
                    "Listing walk aborted after {} jobs, returning partial results: {e}",
                    stubs.len()
                );
                Ok(stubs)
            }
        }
    }

    /// Returns the number of listing pages visited.
    async fn walk(
        &self,
        page: &mut dyn BrowserPage,
        url: &str,
        max_jobs: usize,
        stubs: &mut Vec<JobStub>,
    ) -> Result<usize, BrowserError> {
        let mut seen = HashSet::new();
        let mut pages = 0;

        page.navigate(url, self.site.wait_until, self.site.timeouts.navigation())
            .await?;

        loop {
            page.wait_for_selector(&self.site.listing_selector, self.site.timeouts.listing())
                .await?;
            pages += 1;

            let wrappers = page.query_selector_all(&self.site.listing_selector).await?;
            let added = self.extract_page(&wrappers, max_jobs, &mut seen, stubs);
            debug!("Listing page {pages}: {added} new job(s), {} total", stubs.len());

            if added == 0 {
                info!("No new jobs on listing page {pages}, stopping");
                break;
            }
            if stubs.len() >= max_jobs {
                break;
            }
            let Some(next) = self.find_next(page).await? else {
                debug!("No next-page control on listing page {pages}");
                break;
            };

            match page.click(&next).await {
                Ok(()) => {}
                Err(BrowserError::NotClickable(reason)) => {
                    info!(
                        "Next-page control `{}` on listing page {pages} cannot be followed ({reason}), stopping",
                        self.site.next_page_selector
                    );
                    break;
                }
                Err(e) => return Err(e),
            }
            page.sleep(self.site.delays.page_transition()).await;
        }

        Ok(pages)
    }

    /// Appends unseen stubs from one page; returns how many were added.
    fn extract_page(
        &self,
        wrappers: &[ElementHandle],
        max_jobs: usize,
        seen: &mut HashSet<String>,
        stubs: &mut Vec<JobStub>,
    ) -> usize {
        let mut added = 0;
        for wrapper in wrappers {
            if stubs.len() >= max_jobs {
                break;
            }
            let Some(stub) = self.parse_stub(wrapper) else {
                continue;
            };
            if seen.insert(stub.url.clone()) {
                stubs.push(stub);
                added += 1;
            }
        }
        added
    }

    fn parse_stub(&self, wrapper: &ElementHandle) -> Option<JobStub> {
        let attribute = wrapper.attribute(&self.site.listing_attribute).unwrap_or_default();
        let caps = self.pattern.captures(attribute)?;
        let (params, title, company) = (caps.get(1)?, caps.get(2)?, caps.get(3)?);

        Some(JobStub {
            url: format!("{}{}", self.site.detail_base_url, params.as_str()),
            title: title.as_str().trim().to_string(),
            company: company.as_str().trim().to_string(),
        })
    }

    async fn find_next(&self, page: &dyn BrowserPage) -> Result<Option<ElementHandle>, BrowserError> {
        let label = self.site.next_page_label.trim();
        let candidates = page.query_selector_all(&self.site.next_page_selector).await?;
        Ok(candidates
            .into_iter()
            .find(|el| label.is_empty() || el.inner_text().contains(label)))
    }
}
