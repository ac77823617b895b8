//! Résumé text parsing: name, skills and projects sections, contact details.
//!
//! Absent sections degrade to empty values and absent contact fields to `"Not found"`;
//! parsing never fails.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::resume::{ContactInfo, ResumeProfile};

pub const NOT_FOUND: &str = "Not found";
const UNKNOWN_NAME: &str = "Unknown";

// A section runs from its heading to a blank line or a line holding only a known heading
// (optionally followed by a colon). Lines such as `Experience with Docker` stay inside.
const SECTION_END: &str = r"(?:\n[ \t]*\n|\n[ \t]*(?:education|(?:work\s+|professional\s+)?experience|projects?|achievements|awards|certifications|references?|languages|interests|(?:technical\s+)?skills)[ \t]*:?[ \t]*(?:\n|\z)|\z)";

static SKILLS_SECTION: Lazy<Regex> = Lazy::new(|| section_pattern(r"technical\s+skills|skills"));
static PROJECTS_SECTION: Lazy<Regex> =
    Lazy::new(|| section_pattern(r"project\s+experience|projects"));
static SKILL_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,|;\n]+").expect("valid regex"));

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w.\-]+@[\w\-]+(?:\.[\w\-]+)*\.\w+").expect("valid regex"));
static PHONES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\+880\s?\d{10}",
        r"\b\d{11}\b",
        r"\b\d{3}-\d{8}\b",
        r"\+\d{1,3}[\s\-]?\d{3,4}[\s\-]?\d{3,4}[\s\-]?\d{3,4}",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});
static LINKEDIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://(?:www\.)?linkedin\.com/in/[^\s]+").expect("valid regex")
});
static GITHUB: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://(?:www\.)?github\.com/[^\s]+").expect("valid regex"));

#[derive(Debug, Clone)]
pub struct ParsedResume {
    pub profile: ResumeProfile,
    pub contact: ContactInfo,
}

pub fn parse_resume_text(text: &str) -> ParsedResume {
    let name = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or(UNKNOWN_NAME)
        .to_string();

    let technical_skills = section(&SKILLS_SECTION, text)
        .map(|body| {
            SKILL_SEPARATORS
                .split(body)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    let projects = section(&PROJECTS_SECTION, text)
        .map(|body| body.trim().to_string())
        .unwrap_or_default();

    ParsedResume {
        profile: ResumeProfile {
            name,
            technical_skills,
            projects,
        },
        contact: parse_contact(text),
    }
}

fn section_pattern(headings: &str) -> Regex {
    Regex::new(&format!(
        r"(?is)(?:^|\n)[ \t]*(?:{headings})\b[ \t]*[:\-]?\s*(.+?){SECTION_END}"
    ))
    .expect("valid regex")
}

fn section<'t>(pattern: &Regex, text: &'t str) -> Option<&'t str> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn parse_contact(text: &str) -> ContactInfo {
    let first = |re: &Regex| {
        re.find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| NOT_FOUND.to_string())
    };

    let phone = PHONES
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| NOT_FOUND.to_string());

    let mut github_profiles: Vec<String> = GITHUB
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();
    github_profiles.sort();
    github_profiles.dedup();

    ContactInfo {
        email: first(&EMAIL),
        phone,
        linkedin: first(&LINKEDIN),
        github_profiles,
    }
}
