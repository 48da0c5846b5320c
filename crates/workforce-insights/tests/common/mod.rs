#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use workforce_insights::analysis::{Course, CourseDuration, Posting};
use workforce_insights::insights::{InsightService, SourceStatus};
use workforce_insights::sources::{
    CourseLookup, JobPostingSource, JobSearch, Occupation, OccupationLookup, OccupationSkill,
    Sources,
};

#[derive(Default)]
pub struct FakeOccupations {
    pub occupations: Vec<Occupation>,
    pub skills: HashMap<String, Vec<OccupationSkill>>,
}

impl FakeOccupations {
    /// The first search hit carries `skills`; the runner-up has none.
    pub fn with_skills(code: &str, skills: &[&str]) -> Self {
        let mut by_code = HashMap::new();
        by_code.insert(
            code.to_string(),
            skills
                .iter()
                .map(|name| OccupationSkill {
                    name: name.to_string(),
                })
                .collect(),
        );

        Self {
            occupations: vec![
                Occupation {
                    code: code.to_string(),
                    title: "Best Match".to_string(),
                },
                Occupation {
                    code: "99-9999.00".to_string(),
                    title: "Runner Up".to_string(),
                },
            ],
            skills: by_code,
        }
    }
}

#[async_trait]
impl OccupationLookup for FakeOccupations {
    async fn search_occupation(&self, _title: &str) -> Vec<Occupation> {
        self.occupations.clone()
    }

    async fn skills_for_occupation(&self, code: &str) -> Vec<OccupationSkill> {
        self.skills.get(code).cloned().unwrap_or_default()
    }
}

#[derive(Default)]
pub struct FakeJobs {
    pub search: JobSearch,
    pub queries: Mutex<Vec<(String, String)>>,
}

impl FakeJobs {
    pub fn with_descriptions(descriptions: &[&str]) -> Self {
        let postings = descriptions
            .iter()
            .enumerate()
            .map(|(index, description)| posting(index, description))
            .collect();

        Self {
            search: JobSearch {
                postings,
                debug_error: None,
            },
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: &str) -> Self {
        Self {
            search: JobSearch::failed(error),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<(String, String)> {
        self.queries.lock().expect("queries mutex poisoned").clone()
    }
}

#[async_trait]
impl JobPostingSource for FakeJobs {
    async fn fetch_live_jobs(&self, title: &str, location: &str) -> JobSearch {
        self.queries
            .lock()
            .expect("queries mutex poisoned")
            .push((title.to_string(), location.to_string()));
        self.search.clone()
    }
}

#[derive(Default)]
pub struct FakeCourses {
    pub by_skill: HashMap<String, Vec<Course>>,
    pub lookups: Mutex<Vec<(String, usize)>>,
}

impl FakeCourses {
    /// Every listed skill gets one course of the same length.
    pub fn uniform(skills: &[&str], duration: &str) -> Self {
        let by_skill = skills
            .iter()
            .map(|skill| {
                (
                    skill.to_string(),
                    vec![course(&format!("{skill} fundamentals"), duration)],
                )
            })
            .collect();

        Self {
            by_skill,
            lookups: Mutex::new(Vec::new()),
        }
    }

    pub fn lookups(&self) -> Vec<(String, usize)> {
        self.lookups.lock().expect("lookups mutex poisoned").clone()
    }
}

#[async_trait]
impl CourseLookup for FakeCourses {
    async fn find_courses(&self, skill: &str, limit: usize) -> Vec<Course> {
        self.lookups
            .lock()
            .expect("lookups mutex poisoned")
            .push((skill.to_string(), limit));
        self.by_skill
            .get(skill)
            .map(|courses| courses.iter().take(limit).cloned().collect())
            .unwrap_or_default()
    }
}

pub fn posting(index: usize, description: &str) -> Posting {
    Posting {
        title: format!("Posting {index}"),
        company: "Acme".to_string(),
        description: description.to_string(),
        link: format!("https://acme.example/jobs/{index}"),
        location: "Remote".to_string(),
    }
}

pub fn course(title: &str, duration: &str) -> Course {
    Course {
        title: title.to_string(),
        provider: Some("Coursera".to_string()),
        url: None,
        duration: Some(CourseDuration::from(duration)),
    }
}

pub fn status() -> SourceStatus {
    SourceStatus {
        has_rapidapi_key: true,
        has_onet_api_user: true,
        has_onet_api_pass: false,
        jsearch_fallback: false,
    }
}

pub fn service(
    occupations: FakeOccupations,
    jobs: Arc<FakeJobs>,
    courses: Arc<FakeCourses>,
    dataset_path: PathBuf,
) -> InsightService {
    let sources = Sources {
        occupations: Arc::new(occupations),
        jobs,
        courses,
    };
    InsightService::new(sources, dataset_path, status())
}
