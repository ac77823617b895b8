use serde::{Deserialize, Serialize};

use crate::skills::{extract_skills, extract_skills_from_list, SkillSet};

/// The résumé shape `/upload_resume` produces and `/match-jobs` consumes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeProfile {
    pub name: String,
    #[serde(default)]
    pub technical_skills: Vec<String>,
    #[serde(default)]
    pub projects: String,
}

impl ResumeProfile {
    /// Union of the skills listed explicitly and the skills mentioned in project text.
    pub fn skill_set(&self) -> SkillSet {
        let mut skills = extract_skills_from_list(&self.technical_skills);
        skills.extend(extract_skills(&self.projects));
        skills
    }
}

/// Contact details found in the résumé text. Missing values carry the `"Not found"` sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github_profiles: Vec<String>,
}
