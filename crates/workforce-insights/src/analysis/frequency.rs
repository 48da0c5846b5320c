use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Number of ranked skills reported for live postings.
pub const TOP_SKILL_LIMIT: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillFrequency {
    pub skill: String,
    pub count: usize,
}

/// Counts how often each canonical skill name appears in `corpus` and returns
/// the [`TOP_SKILL_LIMIT`] most frequent, ties kept in input order.
///
/// Counting is plain substring matching on the lowercased corpus, so "java" is
/// also counted inside "javascript". Short skill names are over-counted.
pub fn rank_frequency<S: AsRef<str>>(canonical: &[S], corpus: &str) -> Vec<SkillFrequency> {
    let corpus = corpus.to_lowercase();
    let mut seen = HashSet::new();

    let counted = canonical
        .iter()
        .map(|skill| skill.as_ref().to_lowercase())
        .filter(|skill| !skill.is_empty() && seen.insert(skill.clone()))
        .map(|skill| {
            let count = corpus.matches(skill.as_str()).count();
            SkillFrequency { skill, count }
        })
        .collect();

    ranked(counted, TOP_SKILL_LIMIT)
}

/// Tallies identical items and returns the `limit` most common, ties ordered by
/// first appearance.
pub fn most_common<I, S>(items: I, limit: usize) -> Vec<SkillFrequency>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut tallies: Vec<SkillFrequency> = Vec::new();

    for item in items {
        let skill = item.into();
        match positions.get(&skill) {
            Some(&index) => tallies[index].count += 1,
            None => {
                positions.insert(skill.clone(), tallies.len());
                tallies.push(SkillFrequency { skill, count: 1 });
            }
        }
    }

    ranked(tallies, limit)
}

// `sort_by` is stable, which keeps equal counts in their original order.
fn ranked(mut frequencies: Vec<SkillFrequency>, limit: usize) -> Vec<SkillFrequency> {
    frequencies.sort_by(|left, right| right.count.cmp(&left.count));
    frequencies.truncate(limit);
    frequencies
}
