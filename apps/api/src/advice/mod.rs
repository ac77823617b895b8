//! Improvement advice: pluggable, trait-based advisor that suggests how a résumé could
//! better fit one matched job.
//!
//! `AppState` holds an `Arc<dyn Advisor>`: `GeminiAdvisor` when an API key is configured,
//! `NoAdvice` otherwise. Advisors never fail the caller; errors become an empty list.

use async_trait::async_trait;
use tracing::error;

use crate::advice::prompts::{ADVICE_PROMPT_TEMPLATE, ADVICE_SYSTEM};
use crate::llm_client::LlmClient;
use crate::matching::ranker::MatchResult;
use crate::skills::SkillSet;

pub mod prompts;

pub const MAX_ADVICE_LINES: usize = 5;

pub struct AdviceRequest<'a> {
    pub resume_skills: &'a SkillSet,
    pub result: &'a MatchResult,
}

#[async_trait]
pub trait Advisor: Send + Sync {
    async fn advise(&self, request: &AdviceRequest<'_>) -> Vec<String>;
}

/// Used when no LLM credentials are configured.
pub struct NoAdvice;

#[async_trait]
impl Advisor for NoAdvice {
    async fn advise(&self, _request: &AdviceRequest<'_>) -> Vec<String> {
        Vec::new()
    }
}

pub struct GeminiAdvisor(pub LlmClient);

#[async_trait]
impl Advisor for GeminiAdvisor {
    async fn advise(&self, request: &AdviceRequest<'_>) -> Vec<String> {
        let prompt = build_prompt(request);
        match self.0.call_text(&prompt, ADVICE_SYSTEM).await {
            Ok(text) => parse_advice(&text),
            Err(e) => {
                error!("Advice generation failed for {}: {e}", request.result.job.title);
                Vec::new()
            }
        }
    }
}

fn build_prompt(request: &AdviceRequest<'_>) -> String {
    let result = request.result;

    ADVICE_PROMPT_TEMPLATE
        .replace("{resume_skills}", &join(request.resume_skills))
        .replace("{title}", &result.job.title)
        .replace("{company}", &result.job.company)
        .replace("{required}", &join(&result.required_skills))
        .replace("{matched}", &join(&result.matched_skills))
        .replace("{missing}", &join(&result.missing_skills))
        .replace("{requirements}", &join(&result.requirements))
}

fn join<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    items
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Trimmed, non-empty lines that are not markdown headings, at most `MAX_ADVICE_LINES`.
fn parse_advice(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .take(MAX_ADVICE_LINES)
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::JobStub;

    fn result() -> MatchResult {
        MatchResult {
            job: JobStub {
                url: "https://jobs.example.com/details/?id=1".to_string(),
                title: "SQA Engineer".to_string(),
                company: "Acme".to_string(),
            },
            score: 0.5,
            matched_skills: vec!["python".to_string()],
            missing_skills: ["selenium".to_string()].into_iter().collect(),
            required_skills: ["python".to_string(), "selenium".to_string()]
                .into_iter()
                .collect(),
            requirements: vec!["Experience with Selenium".to_string()],
        }
    }

    #[test]
    fn test_parse_advice_drops_headings_and_caps_lines() {
        let text = "## Advice\n\n1. Learn Selenium\n  2. Add a test project  \n3. a\n4. b\n5. c\n6. d";
        let advice = parse_advice(text);
        assert_eq!(advice.len(), MAX_ADVICE_LINES);
        assert_eq!(advice[0], "1. Learn Selenium");
        assert_eq!(advice[1], "2. Add a test project");
        assert!(!advice.iter().any(|a| a.starts_with('#')));
    }

    #[test]
    fn test_prompt_includes_job_and_skill_lists() {
        let resume_skills: SkillSet = ["python".to_string(), "sql".to_string()].into_iter().collect();
        let result = result();
        let prompt = build_prompt(&AdviceRequest {
            resume_skills: &resume_skills,
            result: &result,
        });

        assert!(prompt.contains("User's resume skills: python, sql"));
        assert!(prompt.contains("Job title: SQA Engineer"));
        assert!(prompt.contains("Company: Acme"));
        assert!(prompt.contains("Missing skills: selenium"));
        assert!(prompt.contains("Job requirements: Experience with Selenium"));
        assert!(!prompt.contains('{'));
    }

    #[tokio::test]
    async fn test_no_advice_is_empty() {
        let resume_skills = SkillSet::new();
        let result = result();
        let advice = NoAdvice
            .advise(&AdviceRequest {
                resume_skills: &resume_skills,
                result: &result,
            })
            .await;
        assert!(advice.is_empty());
    }
}
