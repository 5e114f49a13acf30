// Model exports
pub mod domain;
pub mod raw;
pub mod requests;
pub mod responses;

pub use domain::{
    JobPosting, MatchTier, PostingStatus, ScoreBreakdown, ScoredPosting, ScoringWeights,
    SeniorPreferenceProfile, WorkType,
};
pub use raw::{RawPosting, RawProfile};
pub use requests::{FindRecommendationsRequest, HistoryQuery, RankRequest};
pub use responses::{
    ErrorResponse, HealthResponse, HistoryResponse, InvalidateResponse, RecommendationsResponse,
};
