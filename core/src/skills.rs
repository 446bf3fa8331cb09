use crate::normalize::normalize;
use crate::posting::Posting;
use std::collections::HashSet;

/// Split a `;`-then-`,` delimited skills field into trimmed, non-empty phrases.
/// Order is preserved and duplicates are kept.
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(';')
        .flat_map(|segment| segment.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Resume token set, built once per query and checked against each posting.
pub struct SkillMatcher {
    tokens: HashSet<String>,
}

impl SkillMatcher {
    pub fn new(resume_text: &str) -> Self {
        let tokens = normalize(resume_text).split_whitespace().map(str::to_string).collect();
        Self { tokens }
    }

    /// A phrase matches only when every one of its lowercased words is a resume token.
    pub fn covers(&self, skill: &str) -> bool {
        skill.to_lowercase().split_whitespace().all(|w| self.tokens.contains(w))
    }

    /// Partition the posting's skills into (matched, missing), keeping field order.
    pub fn overlap(&self, posting: &Posting) -> (Vec<String>, Vec<String>) {
        parse_skills(&posting.skills).into_iter().partition(|skill| self.covers(skill))
    }
}

pub fn skill_overlap(resume_text: &str, posting: &Posting) -> (Vec<String>, Vec<String>) {
    SkillMatcher::new(resume_text).overlap(posting)
}
