use serde::{Deserialize, Serialize};

/// Minimal identity record for a discovered listing. The URL is the identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStub {
    pub url: String,
    pub title: String,
    pub company: String,
}

/// A listing enriched with the sections scraped from its detail page.
/// Serializes flat (`title, company, url, skills, requirements`) for the jobs snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDetail {
    #[serde(flatten)]
    pub stub: JobStub,
    /// Deduplicated, in page order.
    pub skills: Vec<String>,
    /// Deduplicated, keyword-filtered, in page order.
    pub requirements: Vec<String>,
}

impl JobDetail {
    pub fn new(stub: JobStub, skills: Vec<String>, requirements: Vec<String>) -> Self {
        Self {
            stub,
            skills,
            requirements,
        }
    }
}
