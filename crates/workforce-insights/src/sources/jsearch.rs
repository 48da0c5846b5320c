use super::{ensure_success, JobPostingSource, JobSearch, SourceError};
use crate::analysis::Posting;
use crate::config::JSearchConfig;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

/// RapidAPI JSearch client. Serves a single sample posting when the fallback
/// switch is on or no API key is configured.
#[derive(Clone)]
pub struct JSearchClient {
    client: reqwest::Client,
    config: JSearchConfig,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<JobRow>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct JobRow {
    job_title: Option<String>,
    employer_name: Option<String>,
    job_description: Option<String>,
    job_apply_link: Option<String>,
    job_city: Option<String>,
    job_state: Option<String>,
    job_country: Option<String>,
}

impl JobRow {
    fn into_posting(self, requested_location: &str) -> Posting {
        let location = [&self.job_city, &self.job_state, &self.job_country]
            .into_iter()
            .filter_map(|part| part.as_deref().map(str::trim))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        Posting {
            title: self.job_title.unwrap_or_default(),
            company: self.employer_name.unwrap_or_default(),
            description: self.job_description.unwrap_or_default(),
            link: self.job_apply_link.unwrap_or_default(),
            location: if location.is_empty() {
                requested_location.to_string()
            } else {
                location
            },
        }
    }
}

impl JSearchClient {
    pub fn new(client: reqwest::Client, config: &JSearchConfig) -> Self {
        Self {
            client,
            config: config.clone(),
        }
    }

    /// Placeholder posting so the service renders something without RapidAPI access.
    pub fn sample_posting(title: &str, location: &str) -> Posting {
        Posting {
            title: format!("{title} (Sample)"),
            company: "ExampleCorp".to_string(),
            description: "Python, SQL, ML.".to_string(),
            link: "https://example.org/1".to_string(),
            location: location.to_string(),
        }
    }

    async fn try_fetch(&self, title: &str, location: &str) -> Result<Vec<Posting>, SourceError> {
        let query = format!("{title} in {location}");
        let response = self
            .client
            .get(&self.config.url)
            .header("X-RapidAPI-Key", &self.config.api_key)
            .header("X-RapidAPI-Host", &self.config.api_host)
            .query(&[
                ("query", query.as_str()),
                ("page", "1"),
                ("num_pages", "1"),
                ("country", self.config.country.as_str()),
                ("language", self.config.language.as_str()),
            ])
            .send()
            .await?;
        let body: SearchResponse = ensure_success(response)?.json().await?;

        Ok(body
            .data
            .into_iter()
            .map(|row| row.into_posting(location))
            .collect())
    }
}

#[async_trait]
impl JobPostingSource for JSearchClient {
    async fn fetch_live_jobs(&self, title: &str, location: &str) -> JobSearch {
        if self.config.uses_fallback() {
            debug!(title, location, "serving sample posting");
            return JobSearch {
                postings: vec![Self::sample_posting(title, location)],
                debug_error: None,
            };
        }

        match self.try_fetch(title, location).await {
            Ok(postings) => {
                debug!(title, location, postings = postings.len(), "fetched live postings");
                JobSearch {
                    postings,
                    debug_error: None,
                }
            }
            Err(error) => {
                warn!(%error, title, location, "live job search failed");
                JobSearch::failed(error.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn config(url: String, api_key: &str, fallback: bool) -> JSearchConfig {
        JSearchConfig {
            api_key: api_key.to_string(),
            api_host: "jsearch.p.rapidapi.com".to_string(),
            url,
            fallback,
            country: "us".to_string(),
            language: "en".to_string(),
        }
    }

    #[tokio::test]
    async fn missing_key_serves_the_sample_posting() {
        let client = JSearchClient::new(
            reqwest::Client::new(),
            &config("http://127.0.0.1:9/search".to_string(), "", false),
        );

        let search = client.fetch_live_jobs("Data Analyst", "Remote").await;

        assert!(search.debug_error.is_none());
        assert_eq!(
            search.postings,
            vec![Posting {
                title: "Data Analyst (Sample)".to_string(),
                company: "ExampleCorp".to_string(),
                description: "Python, SQL, ML.".to_string(),
                link: "https://example.org/1".to_string(),
                location: "Remote".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn fallback_flag_wins_over_a_configured_key() {
        let client = JSearchClient::new(
            reqwest::Client::new(),
            &config("http://127.0.0.1:9/search".to_string(), "key", true),
        );

        let search = client.fetch_live_jobs("Nurse", "Ohio").await;
        assert_eq!(search.postings.len(), 1);
        assert_eq!(search.postings[0].company, "ExampleCorp");
    }

    #[tokio::test]
    async fn live_search_maps_rapidapi_rows() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/search")
                    .query_param("query", "Data Scientist in United States")
                    .query_param("num_pages", "1")
                    .query_param("country", "us")
                    .header("X-RapidAPI-Key", "key")
                    .header("X-RapidAPI-Host", "jsearch.p.rapidapi.com");
                then.status(200).json_body(json!({
                    "status": "OK",
                    "data": [
                        {
                            "job_title": "Senior Data Scientist",
                            "employer_name": "Acme",
                            "job_description": "Python and Spark",
                            "job_apply_link": "https://acme.example/jobs/1",
                            "job_city": "Austin",
                            "job_state": "TX",
                            "job_country": "US"
                        },
                        { "job_title": "Data Scientist", "job_description": null }
                    ]
                }));
            })
            .await;

        let client = JSearchClient::new(
            reqwest::Client::new(),
            &config(server.url("/search"), "key", false),
        );
        let search = client
            .fetch_live_jobs("Data Scientist", "United States")
            .await;

        mock.assert_async().await;
        assert!(search.debug_error.is_none());
        assert_eq!(search.postings.len(), 2);
        assert_eq!(search.postings[0].location, "Austin, TX, US");
        assert_eq!(search.postings[0].description, "Python and Spark");
        assert_eq!(search.postings[1].location, "United States");
        assert_eq!(search.postings[1].description, "");
    }

    #[tokio::test]
    async fn upstream_failure_is_reported_as_debug_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/search");
                then.status(429);
            })
            .await;

        let client = JSearchClient::new(
            reqwest::Client::new(),
            &config(server.url("/search"), "key", false),
        );
        let search = client.fetch_live_jobs("Welder", "Texas").await;

        assert!(search.postings.is_empty());
        let error = search.debug_error.expect("error surfaced");
        assert!(error.contains("429"));
    }
}
