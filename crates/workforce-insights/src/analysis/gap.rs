use super::round_to;
use serde::Serialize;
use std::collections::BTreeSet;

/// Fixed cap on each skill list returned to callers. Applied after sorting, so
/// callers see the lexicographically first entries rather than the most relevant.
pub const PRESENTATION_LIMIT: usize = 40;

/// Candidate-vs-market skill classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapAnalysis {
    pub overlap: Vec<String>,
    pub missing: Vec<String>,
    pub emerging: Vec<String>,
    pub overlap_pct: f64,
}

/// Lowercases canonical skill names into a set, dropping empty names.
pub fn canonical_set<I, S>(skills: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    skills
        .into_iter()
        .map(|skill| skill.as_ref().to_lowercase())
        .filter(|skill| !skill.is_empty())
        .collect()
}

/// Compares a candidate's tokens against the canonical skills for an occupation
/// and the tokens seen across live postings.
///
/// Matching is case-insensitive. `overlap_pct` is computed from the full overlap
/// before the lists are truncated to [`PRESENTATION_LIMIT`].
pub fn analyze_gap<I, S>(
    candidate: &BTreeSet<String>,
    canonical: I,
    market: &BTreeSet<String>,
) -> GapAnalysis
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let canonical = canonical_set(canonical);
    let candidate = lowercased(candidate);
    let market = lowercased(market);

    let overlap: Vec<&String> = candidate.intersection(&canonical).collect();
    let overlap_pct = if canonical.is_empty() {
        0.0
    } else {
        round_to(overlap.len() as f64 / canonical.len() as f64 * 100.0, 2)
    };

    GapAnalysis {
        overlap: presentable(overlap),
        missing: presentable(canonical.difference(&candidate)),
        emerging: presentable(market.difference(&canonical)),
        overlap_pct,
    }
}

fn lowercased(tokens: &BTreeSet<String>) -> BTreeSet<String> {
    tokens.iter().map(|token| token.to_lowercase()).collect()
}

fn presentable<'a, I>(sorted: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    sorted
        .into_iter()
        .take(PRESENTATION_LIMIT)
        .cloned()
        .collect()
}
