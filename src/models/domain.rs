use serde::{Deserialize, Serialize};

use crate::models::raw::{RawPosting, RawProfile};

/// Work setting category shared by senior preferences and job postings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkType {
    Indoor,
    Outdoor,
    Either,
}

/// (variant, accepted spellings)
///
/// Spellings cover the English codes and the Korean display labels and are
/// compared after trimming and lowercasing.
const WORK_TYPE_TABLE: &[(WorkType, &[&str])] = &[
    (WorkType::Indoor, &["indoor", "office", "실내", "사무직", "내근"]),
    (WorkType::Outdoor, &["outdoor", "field", "실외", "야외", "현장"]),
    (WorkType::Either, &["either", "both", "any", "무관", "상관없음", "모두"]),
];

impl WorkType {
    /// Normalize a raw token (code or display label) into a work type.
    ///
    /// Returns `None` for empty or unrecognized input.
    pub fn parse(raw: &str) -> Option<Self> {
        let token = raw.trim().to_lowercase();
        if token.is_empty() {
            return None;
        }

        WORK_TYPE_TABLE
            .iter()
            .find(|(_, spellings)| spellings.contains(&token.as_str()))
            .map(|(work_type, _)| *work_type)
    }
}

/// Government approval state of a job posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostingStatus {
    PendingApproval,
    Approved,
    Rejected,
}

impl PostingStatus {
    /// Parse a backend status string. Anything unrecognized is treated as
    /// still pending so it never becomes eligible by accident.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "approved" | "승인" => PostingStatus::Approved,
            "rejected" | "반려" => PostingStatus::Rejected,
            _ => PostingStatus::PendingApproval,
        }
    }
}

impl Default for PostingStatus {
    fn default() -> Self {
        PostingStatus::PendingApproval
    }
}

/// A senior's stored work preferences
///
/// Deserialization accepts every upstream shape listed in [`RawProfile`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawProfile")]
pub struct SeniorPreferenceProfile {
    pub preferred_location: String,
    pub preferred_work_type: Option<WorkType>,
    /// Comma separated weekday tokens
    pub preferred_work_days: String,
    /// `HH:MM-HH:MM`
    pub preferred_hours: String,
}

/// A job posting as published by a company
///
/// Deserialization accepts every upstream shape listed in [`RawPosting`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawPosting")]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub company_name: String,
    pub description: String,
    pub location: String,
    pub work_type: Option<WorkType>,
    pub wage_amount: u64,
    pub work_days: String,
    pub work_hours: String,
    pub work_period: String,
    pub status: PostingStatus,
}

impl JobPosting {
    /// Only government-approved postings can be recommended
    pub fn is_eligible(&self) -> bool {
        self.status == PostingStatus::Approved
    }
}

/// Points awarded per criterion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub location: u32,
    pub work_days: u32,
    pub work_hours: u32,
    pub work_type: u32,
}

impl ScoreBreakdown {
    /// Sum of all criteria, clamped to 0-100
    pub fn total(&self) -> u8 {
        let sum = self
            .location
            .saturating_add(self.work_days)
            .saturating_add(self.work_hours)
            .saturating_add(self.work_type);
        sum.min(100) as u8
    }
}

/// Human readable compatibility bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Excellent,
    Good,
    Fair,
}

impl MatchTier {
    pub fn from_score(score: u8, weights: &ScoringWeights) -> Self {
        let score = u32::from(score);
        if score >= weights.excellent_tier {
            MatchTier::Excellent
        } else if score >= weights.good_tier {
            MatchTier::Good
        } else {
            MatchTier::Fair
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            MatchTier::Excellent => "excellent",
            MatchTier::Good => "good",
            MatchTier::Fair => "fair",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MatchTier::Excellent => "매우 적합",
            MatchTier::Good => "적합",
            MatchTier::Fair => "보통",
        }
    }
}

/// Ranked recommendation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredPosting {
    #[serde(flatten)]
    pub posting: JobPosting,
    pub match_score: u8,
    pub match_tier: MatchTier,
    /// Display label of `match_tier`, e.g. "매우 적합"
    #[serde(default)]
    pub match_tier_label: String,
    pub breakdown: ScoreBreakdown,
}

impl ScoredPosting {
    pub fn new(posting: JobPosting, breakdown: ScoreBreakdown, weights: &ScoringWeights) -> Self {
        let match_score = breakdown.total();
        let match_tier = MatchTier::from_score(match_score, weights);
        Self {
            posting,
            match_score,
            match_tier,
            match_tier_label: match_tier.label().to_string(),
            breakdown,
        }
    }
}

pub const DEFAULT_LOCATION_WEIGHT: u32 = 40;
pub const DEFAULT_WORK_DAYS_WEIGHT: u32 = 25;
pub const DEFAULT_WORK_HOURS_WEIGHT: u32 = 20;
pub const DEFAULT_WORK_TYPE_WEIGHT: u32 = 15;
/// Awarded when the senior has not listed any preferred days
pub const DEFAULT_NEUTRAL_WORK_DAYS: u32 = 10;
/// Awarded when either hour range cannot be parsed
pub const DEFAULT_NEUTRAL_WORK_HOURS: u32 = 5;
/// Postings scoring below this are not recommended
pub const DEFAULT_MIN_SCORE: u32 = 50;
pub const DEFAULT_EXCELLENT_TIER: u32 = 85;
pub const DEFAULT_GOOD_TIER: u32 = 70;

/// Scoring weights and cut-offs, in points out of 100
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringWeights {
    pub location: u32,
    pub work_days: u32,
    pub work_hours: u32,
    pub work_type: u32,
    pub neutral_work_days: u32,
    pub neutral_work_hours: u32,
    pub min_score: u32,
    pub excellent_tier: u32,
    pub good_tier: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION_WEIGHT,
            work_days: DEFAULT_WORK_DAYS_WEIGHT,
            work_hours: DEFAULT_WORK_HOURS_WEIGHT,
            work_type: DEFAULT_WORK_TYPE_WEIGHT,
            neutral_work_days: DEFAULT_NEUTRAL_WORK_DAYS,
            neutral_work_hours: DEFAULT_NEUTRAL_WORK_HOURS,
            min_score: DEFAULT_MIN_SCORE,
            excellent_tier: DEFAULT_EXCELLENT_TIER,
            good_tier: DEFAULT_GOOD_TIER,
        }
    }
}

impl ScoringWeights {
    /// Maximum attainable score before clamping
    pub fn max_total(&self) -> u32 {
        self.location
            .saturating_add(self.work_days)
            .saturating_add(self.work_hours)
            .saturating_add(self.work_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_type_accepts_codes_and_labels() {
        assert_eq!(WorkType::parse("indoor"), Some(WorkType::Indoor));
        assert_eq!(WorkType::parse(" Office "), Some(WorkType::Indoor));
        assert_eq!(WorkType::parse("실내"), Some(WorkType::Indoor));
        assert_eq!(WorkType::parse("실외"), Some(WorkType::Outdoor));
        assert_eq!(WorkType::parse("BOTH"), Some(WorkType::Either));
        assert_eq!(WorkType::parse("무관"), Some(WorkType::Either));
        assert_eq!(WorkType::parse("시간제"), None);
        assert_eq!(WorkType::parse(""), None);
    }

    #[test]
    fn test_work_type_serializes_as_code() {
        let json = serde_json::to_value(WorkType::Indoor).unwrap();
        assert_eq!(json, "indoor");
        assert_eq!(WorkType::parse(json.as_str().unwrap()), Some(WorkType::Indoor));
    }

    #[test]
    fn test_posting_status_parse() {
        assert_eq!(PostingStatus::parse("approved"), PostingStatus::Approved);
        assert_eq!(PostingStatus::parse("Rejected"), PostingStatus::Rejected);
        assert_eq!(PostingStatus::parse("pending_approval"), PostingStatus::PendingApproval);
        assert_eq!(PostingStatus::parse("draft"), PostingStatus::PendingApproval);
    }

    #[test]
    fn test_breakdown_total_is_clamped() {
        let breakdown = ScoreBreakdown {
            location: 80,
            work_days: 25,
            work_hours: 20,
            work_type: 15,
        };
        assert_eq!(breakdown.total(), 100);
    }

    #[test]
    fn test_oversized_weights_saturate() {
        let breakdown = ScoreBreakdown {
            location: u32::MAX,
            work_days: u32::MAX,
            work_hours: 1,
            work_type: 1,
        };
        assert_eq!(breakdown.total(), 100);

        let weights = ScoringWeights {
            location: u32::MAX,
            work_days: 10,
            ..ScoringWeights::default()
        };
        assert_eq!(weights.max_total(), u32::MAX);
    }

    #[test]
    fn test_scored_posting_carries_tier_label() {
        let breakdown = ScoreBreakdown {
            location: 40,
            work_days: 25,
            work_hours: 5,
            work_type: 0,
        };
        let scored = ScoredPosting::new(JobPosting::default(), breakdown, &ScoringWeights::default());

        assert_eq!(scored.match_score, 70);
        assert_eq!(scored.match_tier, MatchTier::Good);
        assert_eq!(scored.match_tier_label, "적합");

        let json = serde_json::to_value(&scored).unwrap();
        assert_eq!(json["matchTier"], "good");
        assert_eq!(json["matchTierLabel"], "적합");
    }

    #[test]
    fn test_match_tier_cutoffs() {
        let weights = ScoringWeights::default();
        assert_eq!(MatchTier::from_score(100, &weights), MatchTier::Excellent);
        assert_eq!(MatchTier::from_score(85, &weights), MatchTier::Excellent);
        assert_eq!(MatchTier::from_score(84, &weights), MatchTier::Good);
        assert_eq!(MatchTier::from_score(70, &weights), MatchTier::Good);
        assert_eq!(MatchTier::from_score(50, &weights), MatchTier::Fair);
        assert_eq!(MatchTier::Good.label(), "적합");
    }

    #[test]
    fn test_default_weights_sum_to_hundred() {
        assert_eq!(ScoringWeights::default().max_total(), 100);
    }
}
