//! Skill-set extraction: turns free text (or a list of strings) into a set of canonical skills.
//!
//! Algorithm:
//! 1. Lists are joined with `", "` so both shapes split the same way.
//! 2. Split on the delimiter class (`, | / ; : ( ) [ ] { } · • - – — +`, newline, tab).
//! 3. Normalize each piece. Known skills are kept as-is.
//! 4. Multi-word pieces are scanned for known skill n-grams (up to three words); a short
//!    phrase (≤ 3 words) with no known n-gram is kept whole, a longer one is dropped.
//!    Words that double as plain English (`node`, `rest`, ...) only count inside a phrase
//!    when written as a name (capitalised, not the first word) or next to another known
//!    skill, skipping `and` / `or` / `&`.
//! 5. Keep pieces of ≥ 2 chars containing an alphanumeric char, minus the noise set.
//!
//! Total and pure: malformed or empty input yields an empty set.

use std::collections::BTreeSet;

use crate::skills::normalizer::{canonical_known, normalize};

/// Deduplicated collection of canonical skills. A `BTreeSet` keeps serialization deterministic.
pub type SkillSet = BTreeSet<String>;

const DELIMITERS: &[char] = &[
    ',', '|', '/', ';', ':', '(', ')', '[', ']', '{', '}', '·', '•', '-', '–', '—', '+', '\n',
    '\t',
];

const NOISE: &[&str] = &[
    "experience",
    "proficiency",
    "knowledge",
    "familiarity",
    "tools",
    "frameworks",
    "language",
    "technologies",
    "skills",
];

/// Single words too common in prose to count as a skill when found inside a sentence.
const AMBIGUOUS_IN_PROSE: &[&str] = &["next", "node", "rest", "spring", "express"];

/// Skipped when looking for a known skill next to an ambiguous word.
const CONNECTORS: &[&str] = &["and", "or", "&"];

const MAX_PHRASE_WORDS: usize = 3;
const MAX_NGRAM: usize = 3;

/// Extracts the skill set of a free-text blob.
pub fn extract_skills(text: &str) -> SkillSet {
    let mut skills = SkillSet::new();
    for piece in text.split(DELIMITERS) {
        collect_piece(piece, &mut skills);
    }
    skills
}

/// Extracts the skill set of a list of strings.
pub fn extract_skills_from_list<S: AsRef<str>>(items: &[S]) -> SkillSet {
    let joined = items
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(", ");
    extract_skills(&joined)
}

fn collect_piece(piece: &str, out: &mut SkillSet) {
    if let Some(known) = canonical_known(piece) {
        insert_valid(known.to_string(), out);
        return;
    }

    let canonical = normalize(piece);
    let words: Vec<&str> = canonical.split_whitespace().collect();
    if words.len() <= 1 {
        insert_valid(canonical, out);
        return;
    }

    // case survives only when rewriting did not merge words
    let original: Vec<&str> = piece.split_whitespace().collect();
    let capitalized: Vec<bool> = if original.len() == words.len() {
        original
            .iter()
            .map(|w| w.chars().next().is_some_and(char::is_uppercase))
            .collect()
    } else {
        vec![false; words.len()]
    };

    let found = scan_known_ngrams(&words, &capitalized, out);
    if found == 0 && words.len() <= MAX_PHRASE_WORDS {
        insert_valid(words.join(" "), out);
    }
}

/// Greedy longest-first scan for known skills inside a multi-word piece.
/// Returns how many known skills were found.
fn scan_known_ngrams(words: &[&str], capitalized: &[bool], out: &mut SkillSet) -> usize {
    let mut found = 0;
    let mut i = 0;
    while i < words.len() {
        let longest = MAX_NGRAM.min(words.len() - i);
        let hit = (1..=longest).rev().find_map(|n| {
            let candidate = words[i..i + n].join(" ");
            if n == 1
                && AMBIGUOUS_IN_PROSE.contains(&candidate.as_str())
                && !in_skill_context(words, capitalized, i)
            {
                return None;
            }
            canonical_known(&candidate).map(|canonical| (n, canonical))
        });

        match hit {
            Some((n, canonical)) => {
                insert_valid(canonical.to_string(), out);
                found += 1;
                i += n;
            }
            None => i += 1,
        }
    }
    found
}

fn in_skill_context(words: &[&str], capitalized: &[bool], i: usize) -> bool {
    let written_as_name = i > 0 && capitalized.get(i).copied().unwrap_or(false);
    if written_as_name {
        return true;
    }

    let is_skill =
        |w: &str| !AMBIGUOUS_IN_PROSE.contains(&w) && canonical_known(w).is_some();
    let after = words[i + 1..]
        .iter()
        .copied()
        .find(|w| !CONNECTORS.contains(w));
    let before = words[..i]
        .iter()
        .rev()
        .copied()
        .find(|w| !CONNECTORS.contains(w));

    after.map_or(false, is_skill) || before.map_or(false, is_skill)
}

fn insert_valid(skill: String, out: &mut SkillSet) {
    if is_valid_skill(&skill) {
        out.insert(skill);
    }
}

fn is_valid_skill(skill: &str) -> bool {
    skill.chars().count() >= 2
        && skill.chars().any(char::is_alphanumeric)
        && !NOISE.contains(&skill)
}
