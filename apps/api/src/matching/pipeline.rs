//! End-to-end `/match-jobs` flow.
//!
//! résumé skills → listing walk → detail fetch per stub (snapshot after each) → rank →
//! advice per result → matches snapshot.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::advice::{AdviceRequest, Advisor};
use crate::browser::BrowserPage;
use crate::matching::ranker::{rank, MatchResult};
use crate::models::job::{JobDetail, JobStub};
use crate::models::resume::ResumeProfile;
use crate::scraping::{JobDetailScraper, JobListingScraper, ScrapeError};
use crate::snapshot::SnapshotWriter;

pub const MAX_JOBS_LIMIT: usize = 50;

#[derive(Debug, Clone, Deserialize)]
pub struct MatchJobsRequest {
    #[serde(flatten)]
    pub resume: ResumeProfile,
    #[serde(default)]
    pub search_term: Option<String>,
    #[serde(default)]
    pub max_jobs: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobMatch {
    #[serde(flatten)]
    pub result: MatchResult,
    pub improvement_advice: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MatchJobsResponse {
    pub resume: String,
    pub matches: Vec<JobMatch>,
}

/// Borrowed view of the shared services one match run needs.
pub struct MatchPipeline<'a> {
    pub listing: &'a JobListingScraper,
    pub detail: &'a JobDetailScraper,
    pub advisor: &'a dyn Advisor,
    pub snapshots: &'a SnapshotWriter,
    pub default_max_jobs: usize,
}

impl MatchPipeline<'_> {
    pub async fn run_match(
        &self,
        page: &mut dyn BrowserPage,
        request: &MatchJobsRequest,
    ) -> Result<MatchJobsResponse, ScrapeError> {
        let resume = &request.resume;
        let resume_skills = resume.skill_set();
        let max_jobs = request
            .max_jobs
            .unwrap_or(self.default_max_jobs)
            .clamp(1, MAX_JOBS_LIMIT);

        info!(
            "Matching {} ({} skills) against up to {max_jobs} jobs",
            resume.name,
            resume_skills.len()
        );

        let stubs = self
            .listing
            .collect(page, request.search_term.as_deref(), max_jobs)
            .await?;

        let jobs = self.fetch_details(page, stubs).await;

        let mut matches = Vec::with_capacity(jobs.len());
        for result in rank(resume, &jobs) {
            let improvement_advice = self
                .advisor
                .advise(&AdviceRequest {
                    resume_skills: &resume_skills,
                    result: &result,
                })
                .await;
            matches.push(JobMatch {
                result,
                improvement_advice,
            });
        }

        if let Err(e) = self.snapshots.write_matches(&resume.name, &matches).await {
            warn!("Failed to write match snapshot: {e}");
        }

        info!("Ranked {} job(s) for {}", matches.len(), resume.name);
        Ok(MatchJobsResponse {
            resume: resume.name.clone(),
            matches,
        })
    }

    async fn fetch_details(
        &self,
        page: &mut dyn BrowserPage,
        stubs: Vec<JobStub>,
    ) -> Vec<JobDetail> {
        let mut jobs = Vec::with_capacity(stubs.len());

        for (i, stub) in stubs.into_iter().enumerate() {
            if i > 0 {
                page.sleep(self.detail.politeness_delay()).await;
            }
            let sections = self.detail.fetch(page, &stub.url).await;
            jobs.push(JobDetail::new(stub, sections.skills, sections.requirements));

            if let Err(e) = self.snapshots.write_jobs(&jobs).await {
                warn!("Failed to write jobs snapshot: {e}");
            }
        }

        jobs
    }
}
