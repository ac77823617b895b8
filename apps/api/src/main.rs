mod advice;
mod browser;
mod config;
mod errors;
mod llm_client;
mod matching;
mod models;
mod resume;
mod routes;
mod scraping;
mod skills;
mod snapshot;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::advice::{Advisor, GeminiAdvisor, NoAdvice};
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::scraping::{JobDetailScraper, JobListingScraper, SiteProfile};
use crate::snapshot::SnapshotWriter;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Site profile: built-in job board unless SITE_PROFILE points at a JSON override
    let site = match &config.site_profile {
        Some(path) => {
            info!("Loading site profile from {}", path.display());
            SiteProfile::load(path)?
        }
        None => SiteProfile::default(),
    };
    info!("Job board listing: {}", site.listing_url);

    let listing = Arc::new(JobListingScraper::new(site.clone())?);
    let detail = Arc::new(JobDetailScraper::new(site)?);

    // Advisor: Gemini when a key is configured, otherwise advice stays empty
    let advisor: Arc<dyn Advisor> = match &config.gemini_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Arc::new(GeminiAdvisor(llm))
        }
        None => {
            warn!("GEMINI_API_KEY not set, improvement advice will be empty");
            Arc::new(NoAdvice)
        }
    };

    let snapshots = SnapshotWriter::new(&config.output_dir);
    info!("Snapshots will be written to {}", snapshots.dir().display());

    // Build app state
    let state = AppState {
        config: config.clone(),
        listing,
        detail,
        advisor,
        snapshots,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
