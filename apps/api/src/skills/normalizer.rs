//! Skill normalization: collapses spelling variants of one skill token into a single
//! canonical, lowercase name.
//!
//! The synonym table is process-wide read-only state, built on first use.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Literal rewrites that collapse spacing/punctuation variants into one spelling.
/// Applied repeatedly until the token stops changing.
const REWRITES: &[(&str, &str)] = &[
    ("+ +", "++"),
    ("react js", "react"),
    ("node js", "node.js"),
    ("next js", "next.js"),
    ("vue js", "vue.js"),
    ("tailwind css", "tailwindcss"),
    ("postgre sql", "postgresql"),
];

/// Characters stripped from the end of a token after rewriting.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '·', '•'];

/// variant → canonical. Every canonical value is also present as a key mapping to itself,
/// so the key set doubles as the known-skill vocabulary.
const SYNONYMS: &[(&str, &str)] = &[
    // languages
    ("js", "javascript"),
    ("javascript", "javascript"),
    ("ts", "typescript"),
    ("typescript", "typescript"),
    ("python", "python"),
    ("java", "java"),
    ("kotlin", "kotlin"),
    ("golang", "golang"),
    ("rust", "rust"),
    ("ruby", "ruby"),
    ("c++", "c++"),
    ("cpp", "c++"),
    ("c#", "c#"),
    ("csharp", "c#"),
    ("php", "php"),
    ("html", "html"),
    ("html5", "html"),
    ("css", "css"),
    ("css3", "css"),
    ("sql", "sql"),
    ("bash", "bash"),
    // frameworks
    ("react.js", "react"),
    ("reactjs", "react"),
    ("react", "react"),
    ("nextjs", "next.js"),
    ("next", "next.js"),
    ("next.js", "next.js"),
    ("nodejs", "node.js"),
    ("node", "node.js"),
    ("node.js", "node.js"),
    ("express", "express"),
    ("expressjs", "express"),
    ("express.js", "express"),
    ("vue", "vue.js"),
    ("vuejs", "vue.js"),
    ("vue.js", "vue.js"),
    ("angular", "angular"),
    ("angularjs", "angular"),
    ("django", "django"),
    ("flask", "flask"),
    ("fastapi", "fastapi"),
    ("spring", "spring"),
    ("spring boot", "spring boot"),
    ("springboot", "spring boot"),
    ("laravel", "laravel"),
    ("dotnet", ".net"),
    (".net", ".net"),
    ("asp.net", "asp.net"),
    ("tailwind", "tailwindcss"),
    ("tailwindcss", "tailwindcss"),
    ("bootstrap", "bootstrap"),
    ("jquery", "jquery"),
    ("wordpress", "wordpress"),
    // data stores
    ("mongodb", "mongodb"),
    ("mongo", "mongodb"),
    ("postgres", "postgresql"),
    ("postgresql", "postgresql"),
    ("mysql", "mysql"),
    ("sql server", "mssql"),
    ("mssql", "mssql"),
    ("sqlite", "sqlite"),
    ("oracle", "oracle"),
    ("redis", "redis"),
    ("elasticsearch", "elasticsearch"),
    // apis
    ("rest api", "rest"),
    ("restful api", "rest"),
    ("rest apis", "rest"),
    ("restful apis", "rest"),
    ("rest", "rest"),
    ("api", "api"),
    ("apis", "api"),
    ("graphql", "graphql"),
    // infrastructure
    ("docker", "docker"),
    ("kubernetes", "kubernetes"),
    ("k8s", "kubernetes"),
    ("cicd", "ci/cd"),
    ("ci/cd", "ci/cd"),
    ("jenkins", "jenkins"),
    ("git", "git"),
    ("github", "github"),
    ("gitlab", "gitlab"),
    ("bitbucket", "bitbucket"),
    ("aws", "aws"),
    ("amazon web services", "aws"),
    ("gcp", "gcp"),
    ("google cloud", "gcp"),
    ("google cloud platform", "gcp"),
    ("azure", "azure"),
    ("linux", "linux"),
    ("nginx", "nginx"),
    // testing
    ("selenium", "selenium"),
    ("cypress", "cypress"),
    ("appium", "appium"),
    ("jmeter", "jmeter"),
    ("playwright", "playwright"),
    ("jest", "jest"),
    ("pytest", "pytest"),
    ("junit", "junit"),
    ("postman", "postman"),
    ("jira", "jira"),
];

static SYNONYM_TABLE: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| SYNONYMS.iter().copied().collect());

/// Normalizes a raw skill token to its canonical form.
///
/// Empty or punctuation-only input yields an empty string; callers filter those out.
pub fn normalize(token: &str) -> String {
    let cleaned = clean(token);
    match SYNONYM_TABLE.get(cleaned.as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => cleaned,
    }
}

/// Returns the canonical name only when the token is a known skill.
pub fn canonical_known(token: &str) -> Option<&'static str> {
    SYNONYM_TABLE.get(clean(token).as_str()).copied()
}

/// Everything `normalize` does except the synonym lookup.
fn clean(token: &str) -> String {
    let mut t = token.trim().to_lowercase();

    // every rewrite removes a space, so this terminates
    loop {
        let before = t.clone();
        for (from, to) in REWRITES {
            if t.contains(from) {
                t = t.replace(from, to);
            }
        }
        if t == before {
            break;
        }
    }

    t.trim_end_matches(|c: char| TRAILING_PUNCTUATION.contains(&c) || c.is_whitespace())
        .to_string()
}
