use super::{ensure_success, Occupation, OccupationLookup, OccupationSkill, SourceError};
use crate::config::OnetConfig;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::{debug, warn};

/// O*NET Web Services client (basic auth, JSON responses).
#[derive(Clone)]
pub struct OnetClient {
    client: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    occupation: Vec<OccupationRow>,
}

#[derive(Debug, Deserialize)]
struct OccupationRow {
    code: String,
    title: String,
}

#[derive(Debug, Deserialize)]
struct SkillsResponse {
    #[serde(default)]
    element: Vec<SkillRow>,
}

#[derive(Debug, Deserialize)]
struct SkillRow {
    #[serde(default)]
    name: String,
}

impl OnetClient {
    pub fn new(client: reqwest::Client, config: &OnetConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }

    fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}/{}", self.base_url, path))
            .basic_auth(&self.username, Some(&self.password))
            .header(ACCEPT, "application/json")
    }

    async fn try_search(&self, title: &str) -> Result<Vec<Occupation>, SourceError> {
        let response = self
            .get("online/search")
            .query(&[("keyword", title)])
            .send()
            .await?;
        let body: SearchResponse = ensure_success(response)?.json().await?;

        Ok(body
            .occupation
            .into_iter()
            .map(|row| Occupation {
                code: row.code,
                title: row.title,
            })
            .collect())
    }

    async fn try_skills(&self, code: &str) -> Result<Vec<OccupationSkill>, SourceError> {
        let response = self
            .get(&format!("online/occupations/{code}/summary/skills"))
            .send()
            .await?;
        let body: SkillsResponse = ensure_success(response)?.json().await?;

        Ok(body
            .element
            .into_iter()
            .map(|row| OccupationSkill { name: row.name })
            .collect())
    }
}

#[async_trait]
impl OccupationLookup for OnetClient {
    async fn search_occupation(&self, title: &str) -> Vec<Occupation> {
        if !self.has_credentials() {
            debug!(title, "O*NET credentials missing, skipping occupation search");
            return Vec::new();
        }

        match self.try_search(title).await {
            Ok(occupations) => occupations,
            Err(error) => {
                warn!(%error, title, "O*NET occupation search failed");
                Vec::new()
            }
        }
    }

    async fn skills_for_occupation(&self, code: &str) -> Vec<OccupationSkill> {
        if !self.has_credentials() {
            debug!(code, "O*NET credentials missing, skipping skill lookup");
            return Vec::new();
        }

        match self.try_skills(code).await {
            Ok(skills) => skills,
            Err(error) => {
                warn!(%error, code, "O*NET skill lookup failed");
                Vec::new()
            }
        }
    }
}
