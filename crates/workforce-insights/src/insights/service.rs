use super::views::{
    ComparisonStats, CourseRecommendationReport, LiveIntelligenceReport, SkillComparisonReport,
    SourceStatus,
};
use crate::analysis::{
    analyze_gap, build_pathway, rank_frequency, tokenize, Course, CourseRecommendation, Pathway,
    Posting, PATHWAY_SKILL_LIMIT, PRESENTATION_LIMIT,
};
use crate::config::AppConfig;
use crate::dataset::{self, DatasetError, DatasetSummary};
use crate::sources::{SourceError, Sources};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

/// Missing skills that receive a course recommendation.
pub const RECOMMENDATION_SKILL_LIMIT: usize = 10;

/// Fetches upstream data for each insight and hands it to the pure analysis
/// functions. Holds no per-request state.
#[derive(Debug, Clone)]
pub struct InsightService {
    sources: Sources,
    dataset_path: PathBuf,
    status: SourceStatus,
}

impl InsightService {
    pub fn new(sources: Sources, dataset_path: PathBuf, status: SourceStatus) -> Self {
        Self {
            sources,
            dataset_path,
            status,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, SourceError> {
        let sources = Sources::from_config(&config.sources)?;
        Ok(Self::new(
            sources,
            config.dataset.path.clone(),
            SourceStatus::from_config(&config.sources),
        ))
    }

    pub fn source_status(&self) -> SourceStatus {
        self.status
    }

    pub fn dashboard(&self) -> Result<DatasetSummary, DatasetError> {
        dataset::summarize_path(&self.dataset_path)
    }

    /// Canonical skill names for the best occupation match, in taxonomy order.
    async fn canonical_skills(&self, title: &str) -> Vec<String> {
        let occupations = self.sources.occupations.search_occupation(title).await;
        let Some(best) = occupations.first() else {
            debug!(title, "no occupation matched");
            return Vec::new();
        };

        self.sources
            .occupations
            .skills_for_occupation(&best.code)
            .await
            .into_iter()
            .map(|skill| skill.name)
            .collect()
    }

    pub async fn live_intelligence(&self, title: &str, location: &str) -> LiveIntelligenceReport {
        let (search, canonical) = tokio::join!(
            self.sources.jobs.fetch_live_jobs(title, location),
            self.canonical_skills(title),
        );

        let corpus = joined_descriptions(&search.postings);
        let top_skill_freq = rank_frequency(&canonical, &corpus);

        LiveIntelligenceReport {
            query: title.to_string(),
            total_jobs: search.postings.len(),
            top_skill_freq,
            jobs: search.postings,
            debug_error: search.debug_error,
        }
    }

    pub async fn skill_comparison(
        &self,
        resume: &str,
        title: &str,
        location: &str,
    ) -> SkillComparisonReport {
        let (canonical, search) = tokio::join!(
            self.canonical_skills(title),
            self.sources.jobs.fetch_live_jobs(title, location),
        );

        let candidate = tokenize(resume);
        let market = tokenize(&joined_descriptions(&search.postings));
        let gap = analyze_gap(&candidate, &canonical, &market);

        SkillComparisonReport {
            overlap: gap.overlap,
            missing: gap.missing,
            emerging: gap.emerging,
            stats: ComparisonStats {
                overlap_pct: gap.overlap_pct,
            },
        }
    }

    pub async fn recommend_courses(
        &self,
        resume: &str,
        missing: &[String],
    ) -> CourseRecommendationReport {
        let extracted_skills = tokenize(resume)
            .into_iter()
            .take(PRESENTATION_LIMIT)
            .collect();

        let mut course_recommendations = Vec::new();
        for skill in missing.iter().take(RECOMMENDATION_SKILL_LIMIT) {
            let courses = self.sources.courses.find_courses(skill, 1).await;
            course_recommendations.extend(courses.into_iter().map(|course| {
                CourseRecommendation {
                    skill: skill.clone(),
                    course,
                }
            }));
        }

        CourseRecommendationReport {
            extracted_skills,
            course_recommendations,
        }
    }

    pub async fn upskilling_pathway(&self, missing: &[String]) -> Pathway {
        let mut prefetched: HashMap<&str, Vec<Course>> = HashMap::new();
        for skill in missing.iter().take(PATHWAY_SKILL_LIMIT) {
            if !prefetched.contains_key(skill.as_str()) {
                let courses = self.sources.courses.find_courses(skill, 1).await;
                prefetched.insert(skill.as_str(), courses);
            }
        }

        build_pathway(missing, |skill| {
            prefetched.get(skill).cloned().unwrap_or_default()
        })
    }
}

fn joined_descriptions(postings: &[Posting]) -> String {
    postings
        .iter()
        .map(|posting| posting.description.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
