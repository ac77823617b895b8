use anyhow::Context;
use axum::{extract::State, Json};

use crate::browser::HttpPage;
use crate::errors::AppError;
use crate::matching::pipeline::{MatchJobsRequest, MatchJobsResponse};
use crate::state::AppState;

/// POST /match-jobs
pub async fn handle_match_jobs(
    State(state): State<AppState>,
    Json(req): Json<MatchJobsRequest>,
) -> Result<Json<MatchJobsResponse>, AppError> {
    let mut page = HttpPage::new(
        &state.config.user_agent,
        state.listing.site().timeouts.navigation(),
    )
    .context("Failed to open a browser page")?;

    let response = state.pipeline().run_match(&mut page, &req).await?;
    Ok(Json(response))
}
