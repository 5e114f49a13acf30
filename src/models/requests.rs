use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{JobPosting, SeniorPreferenceProfile};

/// Request to recommend postings for a stored senior profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindRecommendationsRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "senior_id", rename = "seniorId")]
    pub senior_id: String,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to rank caller-supplied postings against a caller-supplied profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankRequest {
    /// Missing profile ranks with neutral credit only
    #[serde(default)]
    pub profile: SeniorPreferenceProfile,
    #[validate(length(max = 10000))]
    #[serde(default, alias = "jobPostings", alias = "job_postings")]
    pub postings: Vec<JobPosting>,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Query parameters for the recommendation history endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HistoryQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "senior_id", rename = "seniorId")]
    pub senior_id: String,
    #[serde(default = "default_history_limit")]
    pub limit: u16,
}

fn default_history_limit() -> u16 {
    50
}
