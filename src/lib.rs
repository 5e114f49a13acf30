//! Senior Match - job recommendation service for senior job seekers
//!
//! This library provides the recommendation engine that ranks
//! government-approved job postings against a senior's stored work
//! preferences (location, work days, hours and work setting).

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{Matcher, RecommendationResult};
pub use models::{
    JobPosting, MatchTier, PostingStatus, ScoredPosting, ScoringWeights, SeniorPreferenceProfile,
    WorkType,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let matcher = Matcher::default();
        assert!(matcher.rank(&SeniorPreferenceProfile::default(), &[]).is_empty());
        assert_eq!(WorkType::parse("실내"), Some(WorkType::Indoor));
    }
}
