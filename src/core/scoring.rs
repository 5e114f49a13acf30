use crate::core::{
    location::locations_match,
    schedule::{parse_time_range, parse_work_days},
};
use crate::models::{JobPosting, ScoreBreakdown, ScoringWeights, SeniorPreferenceProfile, WorkType};

/// Score how well a posting fits a senior's preferences
///
/// Scoring formula (default weights):
/// score = (
///     location   40    # either locality contains the other
///     work_days  25    # share of the posting's days the senior covers
///     work_hours 20    # share of the posting's hours the senior covers
///     work_type  15    # same category, or either side is flexible
/// )
///
/// Every criterion is evaluated independently. Missing days or hours earn
/// neutral credit; location and work type mismatches earn nothing.
pub fn calculate_match_score(
    profile: &SeniorPreferenceProfile,
    posting: &JobPosting,
    weights: &ScoringWeights,
) -> ScoreBreakdown {
    ScoreBreakdown {
        location: score_location(&profile.preferred_location, &posting.location, weights),
        work_days: score_work_days(&profile.preferred_work_days, &posting.work_days, weights),
        work_hours: score_work_hours(&profile.preferred_hours, &posting.work_hours, weights),
        work_type: score_work_type(profile.preferred_work_type, posting.work_type, weights),
    }
}

/// Scale a weight by a coverage ratio capped at 1, rounding half up
#[inline]
fn proportional(weight: u32, ratio: f64) -> u32 {
    (f64::from(weight) * ratio.min(1.0)).round() as u32
}

#[inline]
pub fn score_location(preferred: &str, posting: &str, weights: &ScoringWeights) -> u32 {
    if locations_match(preferred, posting) {
        weights.location
    } else {
        0
    }
}

pub fn score_work_days(preferred: &str, posting: &str, weights: &ScoringWeights) -> u32 {
    let preferred_days = parse_work_days(preferred);
    if preferred_days.is_empty() {
        return weights.neutral_work_days;
    }

    let posting_days = parse_work_days(posting);
    let overlap = preferred_days.intersection(&posting_days).count();
    if overlap == 0 {
        return 0;
    }

    proportional(weights.work_days, overlap as f64 / posting_days.len() as f64)
}

pub fn score_work_hours(preferred: &str, posting: &str, weights: &ScoringWeights) -> u32 {
    let (Some(preferred_range), Some(posting_range)) =
        (parse_time_range(preferred), parse_time_range(posting))
    else {
        return weights.neutral_work_hours;
    };

    let duration = posting_range.duration();
    let overlap = preferred_range.overlap(&posting_range);
    if duration == 0 || overlap == 0 {
        return 0;
    }

    proportional(weights.work_hours, f64::from(overlap) / f64::from(duration))
}

#[inline]
pub fn score_work_type(
    preferred: Option<WorkType>,
    posting: Option<WorkType>,
    weights: &ScoringWeights,
) -> u32 {
    match (preferred, posting) {
        (Some(WorkType::Either), _) | (_, Some(WorkType::Either)) => weights.work_type,
        (Some(a), Some(b)) if a == b => weights.work_type,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PostingStatus;

    fn create_test_profile() -> SeniorPreferenceProfile {
        SeniorPreferenceProfile {
            preferred_location: "서울 강남구".to_string(),
            preferred_work_type: Some(WorkType::Indoor),
            preferred_work_days: "MON,WED,FRI".to_string(),
            preferred_hours: "09:00-14:00".to_string(),
        }
    }

    fn create_test_posting(location: &str, days: &str, hours: &str) -> JobPosting {
        JobPosting {
            id: "job_001".to_string(),
            title: "시설 관리 보조".to_string(),
            company_name: "삼성전자".to_string(),
            location: location.to_string(),
            work_type: Some(WorkType::Indoor),
            wage_amount: 12000,
            work_days: days.to_string(),
            work_hours: hours.to_string(),
            status: PostingStatus::Approved,
            ..JobPosting::default()
        }
    }

    #[test]
    fn test_perfect_match_scores_hundred() {
        let profile = create_test_profile();
        let posting = create_test_posting("강남구", "MON,WED,FRI", "09:00-13:00");
        let weights = ScoringWeights::default();

        let breakdown = calculate_match_score(&profile, &posting, &weights);

        assert_eq!(
            breakdown,
            ScoreBreakdown {
                location: 40,
                work_days: 25,
                work_hours: 20,
                work_type: 15,
            }
        );
        assert_eq!(breakdown.total(), 100);
    }

    #[test]
    fn test_location_mismatch_is_hard_zero() {
        let weights = ScoringWeights::default();
        assert_eq!(score_location("서울 강남구", "부산", &weights), 0);
        assert_eq!(score_location("", "부산", &weights), 0);
        assert_eq!(score_location("서울 강남구", "강남구", &weights), 40);
    }

    #[test]
    fn test_work_days_proportional_to_posting_schedule() {
        let weights = ScoringWeights::default();

        // Senior covers 2 of the posting's 3 days: round(25 * 2/3) = 17
        assert_eq!(score_work_days("MON,WED", "MON,WED,FRI", &weights), 17);
        // Senior covers 1 of 4: round(6.25) = 6
        assert_eq!(score_work_days("MON", "MON,TUE,WED,THU", &weights), 6);
        // Senior available on more days than the posting needs
        assert_eq!(score_work_days("MON,TUE,WED,THU,FRI", "TUE,THU", &weights), 25);
        // Korean and English tokens compare equal
        assert_eq!(score_work_days("MON,WED,FRI", "월, 수, 금", &weights), 25);
    }

    #[test]
    fn test_work_days_no_overlap_or_no_preference() {
        let weights = ScoringWeights::default();
        assert_eq!(score_work_days("SAT,SUN", "MON,WED,FRI", &weights), 0);
        assert_eq!(score_work_days("MON", "", &weights), 0);
        assert_eq!(score_work_days("", "MON,WED,FRI", &weights), 10);
        assert_eq!(score_work_days("garbage", "MON", &weights), 10);
    }

    #[test]
    fn test_work_hours_overlap() {
        let weights = ScoringWeights::default();

        assert_eq!(score_work_hours("09:00-14:00", "09:00-13:00", &weights), 20);
        // 3 of the posting's 5 hours: round(20 * 0.6) = 12
        assert_eq!(score_work_hours("09:00-13:00", "10:00-15:00", &weights), 12);
        assert_eq!(score_work_hours("06:00-09:00", "10:00-15:00", &weights), 0);
        // Zero-length posting window
        assert_eq!(score_work_hours("09:00-14:00", "10:00-10:00", &weights), 0);
    }

    #[test]
    fn test_work_hours_neutral_when_unparseable() {
        let weights = ScoringWeights::default();
        assert_eq!(score_work_hours("", "09:00-13:00", &weights), 5);
        assert_eq!(score_work_hours("09:00-14:00", "오전", &weights), 5);
        assert_eq!(score_work_hours("0900", "1300", &weights), 5);
    }

    #[test]
    fn test_work_type_rules() {
        let weights = ScoringWeights::default();
        assert_eq!(score_work_type(Some(WorkType::Indoor), Some(WorkType::Indoor), &weights), 15);
        assert_eq!(score_work_type(Some(WorkType::Either), Some(WorkType::Outdoor), &weights), 15);
        assert_eq!(score_work_type(None, Some(WorkType::Either), &weights), 15);
        assert_eq!(score_work_type(Some(WorkType::Indoor), Some(WorkType::Outdoor), &weights), 0);
        assert_eq!(score_work_type(None, None, &weights), 0);
        assert_eq!(score_work_type(Some(WorkType::Indoor), None, &weights), 0);
    }

    #[test]
    fn test_custom_weights_are_respected() {
        let weights = ScoringWeights {
            location: 10,
            work_days: 40,
            work_hours: 30,
            work_type: 20,
            ..ScoringWeights::default()
        };
        let profile = create_test_profile();
        let posting = create_test_posting("부산", "MON,WED,FRI", "09:00-13:00");

        let breakdown = calculate_match_score(&profile, &posting, &weights);
        assert_eq!(breakdown.location, 0);
        assert_eq!(breakdown.work_days, 40);
        assert_eq!(breakdown.work_hours, 30);
        assert_eq!(breakdown.work_type, 20);
    }
}
