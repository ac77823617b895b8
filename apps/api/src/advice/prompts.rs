pub const ADVICE_SYSTEM: &str = "You are a concise career coach for software and QA engineers. \
    Answer with a short numbered list only. \
    Do NOT include headings, introductions, or closing remarks.";

/// Placeholders: {resume_skills}, {title}, {company}, {required}, {matched}, {missing},
/// {requirements}.
pub const ADVICE_PROMPT_TEMPLATE: &str = "\
User's resume skills: {resume_skills}

Job title: {title}
Company: {company}
Required skills extracted: {required}
Matched skills: {matched}
Missing skills: {missing}
Job requirements: {requirements}

Provide 3-5 specific pieces of improvement advice to help the user's resume better match this job. \
Focus on how to acquire or highlight the missing skills.";
