// Skill normalization and set extraction shared by résumé parsing and job matching.

pub mod extractor;
pub mod normalizer;

pub use extractor::{extract_skills, extract_skills_from_list, SkillSet};
