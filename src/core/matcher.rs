use crate::core::scoring::calculate_match_score;
use crate::models::{JobPosting, ScoredPosting, ScoringWeights, SeniorPreferenceProfile};

/// Result of a recommendation run
#[derive(Debug)]
pub struct RecommendationResult {
    pub recommendations: Vec<ScoredPosting>,
    pub total_candidates: usize,
    pub eligible_candidates: usize,
}

/// Recommendation orchestrator - ranks job postings for one senior
///
/// # Pipeline Stages
/// 1. Eligibility filter (approved postings only)
/// 2. Per-criterion scoring
/// 3. Threshold filter
/// 4. Stable sort by score
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Rank postings for a senior's preferences
    ///
    /// Only approved postings scoring at least the configured threshold are
    /// returned, highest score first. Postings with equal scores keep their
    /// input order. Never fails; empty input yields an empty list.
    pub fn rank(
        &self,
        profile: &SeniorPreferenceProfile,
        postings: &[JobPosting],
    ) -> Vec<ScoredPosting> {
        let mut ranked: Vec<ScoredPosting> = postings
            .iter()
            // Stage 1: Eligibility
            .filter(|posting| posting.is_eligible())
            // Stage 2 & 3: Score and apply threshold
            .filter_map(|posting| {
                let breakdown = calculate_match_score(profile, posting, &self.weights);

                if u32::from(breakdown.total()) >= self.weights.min_score {
                    Some(ScoredPosting::new(posting.clone(), breakdown, &self.weights))
                } else {
                    None
                }
            })
            .collect();

        // Stage 4: sort_by is stable, so ties keep input order
        ranked.sort_by(|a, b| b.match_score.cmp(&a.match_score));

        tracing::trace!(
            "Ranked {} of {} postings above threshold {}",
            ranked.len(),
            postings.len(),
            self.weights.min_score
        );

        ranked
    }

    /// Rank postings and keep the best `limit`
    ///
    /// # Arguments
    /// * `profile` - The senior's stored preferences
    /// * `postings` - Every posting known to the backend, any status
    /// * `limit` - Maximum number of recommendations to return
    pub fn find_recommendations(
        &self,
        profile: &SeniorPreferenceProfile,
        postings: &[JobPosting],
        limit: usize,
    ) -> RecommendationResult {
        let eligible_candidates = postings.iter().filter(|p| p.is_eligible()).count();

        let mut recommendations = self.rank(profile, postings);
        recommendations.truncate(limit);

        RecommendationResult {
            recommendations,
            total_candidates: postings.len(),
            eligible_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
