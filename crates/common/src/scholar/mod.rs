//! Scholar search client abstraction
//!
//! Provides a unified interface to the external scholarly-search collaborator
//! (SerpApi Google Scholar). Every field of the wire response is optional;
//! absence degrades to defaults downstream instead of failing the request.

use crate::config::ScholarConfig;
use crate::errors::{AppError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Raw scholar search response.
///
/// A missing `organic_results` key is a valid empty state, not an error.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScholarResponse {
    #[serde(default)]
    pub organic_results: Vec<OrganicResult>,

    /// SerpApi reports failures in-band through this field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OrganicResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_links: Option<InlineLinks>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InlineLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cited_by: Option<CitedBy>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CitedBy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl OrganicResult {
    /// Citation count with every missing nesting level defaulting to zero
    pub fn cited_by_total(&self) -> u64 {
        self.inline_links
            .as_ref()
            .and_then(|links| links.cited_by.as_ref())
            .and_then(|cited| cited.total)
            .unwrap_or(0)
    }
}

/// Trait for scholar search providers
#[async_trait]
pub trait ScholarSearch: Send + Sync {
    /// Search for papers related to a title
    async fn search(&self, query: &str) -> Result<ScholarResponse>;
}

/// SerpApi Google Scholar client
pub struct SerpApiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    engine: String,
    num_results: usize,
    timeout_secs: u64,
    max_retries: u32,
}

impl SerpApiClient {
    /// Create a client from configuration.
    ///
    /// Fails when no API key is configured; the credential must come from the
    /// environment or a config file, never from source.
    pub fn from_config(config: &ScholarConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| AppError::Configuration {
                message: "scholar.api_key is not set (APP__SCHOLAR__API_KEY)".to_string(),
            })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(AppError::HttpClient)?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.clone(),
            engine: config.engine.clone(),
            num_results: config.num_results,
            timeout_secs: config.timeout_secs,
            max_retries: config.max_retries,
        })
    }

    /// Make request with retry on transient failures
    async fn request_with_retry(&self, query: &str) -> Result<ScholarResponse> {
        let mut last_error = None;

        for attempt in 0..self.max_retries {
            if attempt > 0 {
                // Exponential backoff
                let delay = Duration::from_millis(100 * (2_u64.pow(attempt)));
                tokio::time::sleep(delay).await;
            }

            let start = Instant::now();
            match self.make_request(query).await {
                Ok(response) => {
                    crate::metrics::record_scholar_request(start.elapsed().as_secs_f64(), true);
                    return Ok(response);
                }
                Err(e) => {
                    crate::metrics::record_scholar_request(start.elapsed().as_secs_f64(), false);

                    if !e.is_retryable() {
                        return Err(e);
                    }

                    tracing::warn!(
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        error = %e,
                        "Scholar request failed, retrying"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| AppError::ScholarUpstream {
            message: "Unknown error after retries".to_string(),
        }))
    }

    async fn make_request(&self, query: &str) -> Result<ScholarResponse> {
        let num = self.num_results.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("engine", self.engine.as_str()),
                ("q", query),
                ("api_key", self.api_key.as_str()),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::ScholarTimeout {
                        timeout_secs: self.timeout_secs,
                    }
                } else {
                    AppError::HttpClient(e)
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(AppError::ScholarAuth {
                message: format!("upstream returned {}", status),
            });
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AppError::ScholarRateLimited);
        }
        if status.is_server_error() {
            return Err(AppError::ScholarUpstream {
                message: format!("upstream returned {}", status),
            });
        }

        let body: ScholarResponse = response.json().await.map_err(|e| AppError::ScholarUpstream {
            message: format!("malformed upstream response: {}", e),
        })?;

        // SerpApi reports key problems with a 200 and an in-band error field
        if let Some(error) = &body.error {
            let lowered = error.to_lowercase();
            if lowered.contains("api key") || lowered.contains("api_key") {
                return Err(AppError::ScholarAuth {
                    message: error.clone(),
                });
            }
            return Err(AppError::ScholarUpstream {
                message: error.clone(),
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl ScholarSearch for SerpApiClient {
    async fn search(&self, query: &str) -> Result<ScholarResponse> {
        self.request_with_retry(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScholarConfig;
    use serde_json::json;

    fn test_config(api_key: Option<&str>) -> ScholarConfig {
        ScholarConfig {
            api_key: api_key.map(|k| k.to_string()),
            base_url: "https://serpapi.example/search".to_string(),
            engine: "google_scholar".to_string(),
            num_results: 20,
            timeout_secs: 5,
            max_retries: 2,
        }
    }

    #[test]
    fn test_client_requires_api_key() {
        let err = SerpApiClient::from_config(&test_config(None)).err().unwrap();
        assert!(matches!(err, AppError::Configuration { .. }));
        assert!(SerpApiClient::from_config(&test_config(Some("key"))).is_ok());
    }

    #[test]
    fn test_response_all_fields_optional() {
        let response: ScholarResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.organic_results.is_empty());
        assert!(response.error.is_none());
    }

    #[test]
    fn test_cited_by_total_defaults() {
        let result: OrganicResult = serde_json::from_value(json!({
            "title": "Graph Theory 101"
        }))
        .unwrap();
        assert_eq!(result.cited_by_total(), 0);

        let result: OrganicResult = serde_json::from_value(json!({
            "title": "Deep Learning Basics",
            "inline_links": { "cited_by": { "total": 42 } }
        }))
        .unwrap();
        assert_eq!(result.cited_by_total(), 42);

        // Partial nesting still defaults to zero
        let result: OrganicResult = serde_json::from_value(json!({
            "title": "Partial",
            "inline_links": { "cited_by": {} }
        }))
        .unwrap();
        assert_eq!(result.cited_by_total(), 0);
    }

    #[test]
    fn test_response_parses_organic_results() {
        let response: ScholarResponse = serde_json::from_value(json!({
            "organic_results": [
                { "title": "A" },
                { "snippet": "no title here" }
            ]
        }))
        .unwrap();
        assert_eq!(response.organic_results.len(), 2);
        assert_eq!(response.organic_results[0].title.as_deref(), Some("A"));
        assert!(response.organic_results[1].title.is_none());
    }
}
