use std::sync::Arc;

use crate::advice::Advisor;
use crate::config::Config;
use crate::matching::pipeline::MatchPipeline;
use crate::scraping::{JobDetailScraper, JobListingScraper};
use crate::snapshot::SnapshotWriter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub listing: Arc<JobListingScraper>,
    pub detail: Arc<JobDetailScraper>,
    /// Pluggable advisor. `GeminiAdvisor` when GEMINI_API_KEY is set, `NoAdvice` otherwise.
    pub advisor: Arc<dyn Advisor>,
    pub snapshots: SnapshotWriter,
}

impl AppState {
    pub fn pipeline(&self) -> MatchPipeline<'_> {
        MatchPipeline {
            listing: &self.listing,
            detail: &self.detail,
            advisor: self.advisor.as_ref(),
            snapshots: &self.snapshots,
            default_max_jobs: self.config.max_jobs,
        }
    }
}
