use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Absent means no improvement advice.
    pub gemini_api_key: Option<String>,
    pub output_dir: PathBuf,
    pub max_jobs: usize,
    /// JSON `SiteProfile` overriding the built-in job board.
    pub site_profile: Option<PathBuf>,
    pub user_agent: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: optional_env("PORT")
                .unwrap_or_else(|| "5001".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            output_dir: optional_env("OUTPUT_DIR")
                .unwrap_or_else(|| "output".to_string())
                .into(),
            max_jobs: optional_env("MAX_JOBS")
                .unwrap_or_else(|| "10".to_string())
                .parse::<usize>()
                .context("MAX_JOBS must be a non-negative integer")?,
            site_profile: optional_env("SITE_PROFILE").map(PathBuf::from),
            user_agent: optional_env("USER_AGENT").unwrap_or_else(|| "Mozilla/5.0".to_string()),
        })
    }
}

/// Unset and blank variables are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
