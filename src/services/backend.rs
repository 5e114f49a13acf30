use crate::models::{JobPosting, SeniorPreferenceProfile};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the job board backend
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Job board REST API client
///
/// Read-only access to the two resources the recommender needs:
/// - Senior preference profiles
/// - The full list of job postings (every status)
pub struct BackendClient {
    base_url: String,
    client: Client,
}

impl BackendClient {
    /// Create a new backend client
    pub fn new(base_url: String, timeout_secs: u64) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { base_url, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Fetch the stored preferences of a senior
    ///
    /// GET /api/seniors/{seniorId}
    pub async fn get_profile(
        &self,
        senior_id: &str,
    ) -> Result<SeniorPreferenceProfile, BackendError> {
        let url = self.url(&format!("/api/seniors/{}", urlencoding::encode(senior_id)));

        tracing::debug!("Fetching profile for senior: {}", senior_id);

        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound(format!(
                "Profile not found for senior {}",
                senior_id
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to fetch profile for {}: {} - {}", senior_id, status, body);
            return Err(BackendError::ApiError(format!(
                "Failed to fetch profile: {}",
                status
            )));
        }

        let json: Value = response.json().await?;

        if json.get("success").and_then(Value::as_bool) == Some(false) {
            return Err(BackendError::NotFound(format!(
                "Profile not found for senior {}",
                senior_id
            )));
        }

        // The backend wraps the record as {"success": true, "profile": {...}}
        let data = json.get("profile").unwrap_or(&json);

        serde_json::from_value(data.clone())
            .map_err(|e| BackendError::InvalidResponse(format!("Failed to parse profile: {}", e)))
    }

    /// Fetch every job posting, regardless of approval status
    ///
    /// GET /api/jobs
    pub async fn list_postings(&self) -> Result<Vec<JobPosting>, BackendError> {
        let url = self.url("/api/jobs");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(BackendError::ApiError(format!(
                "Failed to list postings: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let documents = match &json {
            Value::Array(items) => items,
            other => other
                .get("jobs")
                .and_then(Value::as_array)
                .ok_or_else(|| BackendError::InvalidResponse("Missing jobs array".into()))?,
        };

        let postings: Vec<JobPosting> = documents
            .iter()
            .filter_map(|doc| match serde_json::from_value(doc.clone()) {
                Ok(posting) => Some(posting),
                Err(e) => {
                    tracing::warn!("Skipping unreadable posting: {}", e);
                    None
                }
            })
            .collect();

        tracing::debug!("Fetched {} postings (raw: {})", postings.len(), documents.len());

        Ok(postings)
    }
}
