use serde::Serialize;

use crate::matching::scorer::score_match;
use crate::models::job::{JobDetail, JobStub};
use crate::models::resume::ResumeProfile;
use crate::skills::{extract_skills, extract_skills_from_list, SkillSet};

/// Separator for requirement lines so tokens never merge across sentence boundaries.
const REQUIREMENT_SEPARATOR: &str = " . ";

/// One job scored against one résumé. Serializes flat with the job's identity fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    #[serde(flatten)]
    pub job: JobStub,
    pub score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: SkillSet,
    pub required_skills: SkillSet,
    pub requirements: Vec<String>,
}

/// Union of the listed skill chips and the skills mentioned in requirement lines.
pub fn job_skill_set(job: &JobDetail) -> SkillSet {
    let mut skills = extract_skills_from_list(&job.skills);
    skills.extend(extract_skills(&job.requirements.join(REQUIREMENT_SEPARATOR)));
    skills
}

/// Scores every job and sorts by score, highest first. Ties keep input order.
pub fn rank(resume: &ResumeProfile, jobs: &[JobDetail]) -> Vec<MatchResult> {
    let resume_skills = resume.skill_set();

    let mut results: Vec<MatchResult> = jobs
        .iter()
        .map(|job| {
            let required = job_skill_set(job);
            let overlap = score_match(&resume_skills, &required);
            MatchResult {
                job: job.stub.clone(),
                score: overlap.score,
                matched_skills: overlap.matched,
                missing_skills: overlap.missing,
                required_skills: required,
                requirements: job.requirements.clone(),
            }
        })
        .collect();

    // sort_by is stable
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results
}
