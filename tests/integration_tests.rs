// Integration tests for Senior Match

use senior_match::core::Matcher;
use senior_match::models::{JobPosting, MatchTier, PostingStatus, SeniorPreferenceProfile, ScoringWeights};

fn gangnam_profile() -> SeniorPreferenceProfile {
    serde_json::from_value(serde_json::json!({
        "preferredLocation": "서울 강남구",
        "preferredWorkType": "office",
        "preferredWorkDays": "MON,WED,FRI",
        "preferredHours": "09:00-14:00"
    }))
    .unwrap()
}

fn posting(id: &str, location: &str, status: &str) -> JobPosting {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "title": format!("공고 {}", id),
        "companyName": "행복복지관",
        "location": location,
        "workType": "office",
        "wageAmount": 10030,
        "workDays": "MON,WED,FRI",
        "workHours": "09:00-13:00",
        "status": status
    }))
    .unwrap()
}

#[test]
fn test_integration_perfect_match() {
    let matcher = Matcher::with_default_weights();
    let ranked = matcher.rank(&gangnam_profile(), &[posting("1", "강남구", "approved")]);

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].match_score, 100);
    assert_eq!(ranked[0].match_tier, MatchTier::Excellent);
    assert_eq!(ranked[0].breakdown.location, 40);
    assert_eq!(ranked[0].breakdown.work_days, 25);
    assert_eq!(ranked[0].breakdown.work_hours, 20);
    assert_eq!(ranked[0].breakdown.work_type, 15);
}

#[test]
fn test_integration_location_mismatch_still_passes() {
    let matcher = Matcher::with_default_weights();
    let ranked = matcher.rank(&gangnam_profile(), &[posting("1", "부산", "approved")]);

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].match_score, 60);
    assert_eq!(ranked[0].match_tier, MatchTier::Fair);
}

#[test]
fn test_integration_unapproved_never_returned() {
    let matcher = Matcher::with_default_weights();
    let postings = vec![
        posting("1", "강남구", "pending_approval"),
        posting("2", "강남구", "rejected"),
    ];

    assert!(matcher.rank(&gangnam_profile(), &postings).is_empty());
}

#[test]
fn test_integration_empty_profile_flat_credit() {
    let matcher = Matcher::with_default_weights();
    let profile = SeniorPreferenceProfile {
        preferred_location: "서울 강남구".to_string(),
        preferred_work_type: None,
        preferred_work_days: String::new(),
        preferred_hours: String::new(),
    };

    let ranked = matcher.rank(&profile, &[posting("1", "강남구", "approved")]);

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].breakdown.work_days, 10);
    assert_eq!(ranked[0].breakdown.work_hours, 5);
    assert_eq!(ranked[0].match_score, 55);
}

#[test]
fn test_integration_empty_postings() {
    let matcher = Matcher::with_default_weights();
    assert!(matcher.rank(&gangnam_profile(), &[]).is_empty());
}

#[test]
fn test_integration_sorted_and_idempotent() {
    let matcher = Matcher::with_default_weights();
    let mut partial_hours = posting("3", "강남구", "approved");
    partial_hours.work_hours = "09:00-18:00".to_string();

    let postings = vec![
        posting("1", "부산", "approved"),
        partial_hours,
        posting("2", "강남구", "approved"),
    ];

    let first = matcher.rank(&gangnam_profile(), &postings);
    let second = matcher.rank(&gangnam_profile(), &postings);

    assert_eq!(first, second);
    assert!(first.windows(2).all(|w| w[0].match_score >= w[1].match_score));
    assert_eq!(first[0].posting.id, "2");
    assert!(first.iter().all(|s| s.match_score >= 50 && s.match_score <= 100));
    assert!(first.iter().all(|s| s.posting.status == PostingStatus::Approved));
}

#[test]
fn test_integration_backend_shaped_payloads() {
    let profile: SeniorPreferenceProfile = serde_json::from_value(serde_json::json!({
        "location": "서울 강남구",
        "workType": "실내",
        "workDays": ["월", "수", "금"],
        "workStartTime": "09:00",
        "workEndTime": "14:00"
    }))
    .unwrap();

    let posting: JobPosting = serde_json::from_value(serde_json::json!({
        "job_id": 7,
        "job_title": "도서관 사서 보조",
        "location": "강남구",
        "employment_type": "indoor",
        "wage_amount": "11,500",
        "work_days": "월,수,금",
        "work_hours": "09:00-13:00",
        "status": "approved"
    }))
    .unwrap();

    let ranked = Matcher::with_default_weights().rank(&profile, &[posting]);

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].posting.id, "7");
    assert_eq!(ranked[0].posting.wage_amount, 11500);
    assert_eq!(ranked[0].match_score, 100);
}

#[test]
fn test_integration_custom_weights() {
    let weights = ScoringWeights {
        min_score: 90,
        ..ScoringWeights::default()
    };
    let matcher = Matcher::new(weights);

    let postings = vec![posting("1", "부산", "approved"), posting("2", "강남구", "approved")];
    let result = matcher.find_recommendations(&gangnam_profile(), &postings, 10);

    assert_eq!(result.total_candidates, 2);
    assert_eq!(result.eligible_candidates, 2);
    assert_eq!(result.recommendations.len(), 1);
    assert_eq!(result.recommendations[0].posting.id, "2");
}
