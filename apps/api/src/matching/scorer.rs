//! Overlap scoring between a résumé skill set and a job skill set.
//!
//! score = |résumé ∩ job| / max(1, |job|), rounded to 4 decimals.
//! A job with no detected skills scores 0 rather than dividing by zero.

use crate::skills::SkillSet;

#[derive(Debug, Clone, PartialEq)]
pub struct Overlap {
    /// In [0, 1].
    pub score: f64,
    /// Sorted ascending.
    pub matched: Vec<String>,
    pub missing: SkillSet,
}

pub fn score_match(resume_skills: &SkillSet, job_skills: &SkillSet) -> Overlap {
    // BTreeSet intersection iterates in ascending order
    let matched: Vec<String> = resume_skills.intersection(job_skills).cloned().collect();
    let missing: SkillSet = job_skills.difference(resume_skills).cloned().collect();
    let score = round4(matched.len() as f64 / job_skills.len().max(1) as f64);

    Overlap {
        score,
        matched,
        missing,
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
