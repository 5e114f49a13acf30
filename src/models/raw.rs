//! Upstream record shapes accepted at the service boundary.
//!
//! Profiles and postings arrive from the backend REST API, from the
//! browser's local storage seed data, and from callers of the ranking
//! endpoint, each with its own key spelling. The alias lists below are the
//! single mapping from those shapes to the canonical records.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::domain::{JobPosting, PostingStatus, SeniorPreferenceProfile, WorkType};

/// Any accepted senior preference shape
///
/// Primary names are the canonical serialized keys; aliases cover the rest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawProfile {
    #[serde(
        rename = "preferredLocation",
        alias = "preferred_location",
        alias = "location",
        alias = "workLocation",
        alias = "work_location"
    )]
    #[serde(deserialize_with = "lenient_string")]
    pub location: Option<String>,

    #[serde(
        rename = "preferredWorkType",
        alias = "preferred_work_type",
        alias = "workType",
        alias = "work_type",
        alias = "jobType",
        alias = "job_type",
        alias = "employment_type",
        alias = "employmentType"
    )]
    #[serde(deserialize_with = "lenient_string")]
    pub work_type: Option<String>,

    #[serde(
        rename = "preferredWorkDays",
        alias = "preferred_work_days",
        alias = "workDays",
        alias = "work_days"
    )]
    #[serde(deserialize_with = "lenient_days")]
    pub work_days: Option<String>,

    #[serde(
        rename = "preferredHours",
        alias = "preferred_hours",
        alias = "workHours",
        alias = "work_hours"
    )]
    #[serde(deserialize_with = "lenient_string")]
    pub work_hours: Option<String>,

    /// Local storage keeps the preferred range as two separate clock values
    #[serde(rename = "workStartTime", alias = "work_start_time")]
    #[serde(deserialize_with = "lenient_string")]
    pub work_start_time: Option<String>,

    #[serde(rename = "workEndTime", alias = "work_end_time")]
    #[serde(deserialize_with = "lenient_string")]
    pub work_end_time: Option<String>,

    /// User records nest the preferences one level down
    pub preferences: Option<Box<RawProfile>>,
}

impl From<RawProfile> for SeniorPreferenceProfile {
    fn from(raw: RawProfile) -> Self {
        let nested = raw.preferences.map(|p| SeniorPreferenceProfile::from(*p));

        let hours = raw.work_hours.filter(|h| !h.trim().is_empty()).or_else(|| {
            match (raw.work_start_time, raw.work_end_time) {
                (Some(start), Some(end)) if !start.trim().is_empty() && !end.trim().is_empty() => {
                    Some(format!("{}-{}", start.trim(), end.trim()))
                }
                _ => None,
            }
        });

        let flat = SeniorPreferenceProfile {
            preferred_location: raw.location.unwrap_or_default(),
            preferred_work_type: raw.work_type.as_deref().and_then(WorkType::parse),
            preferred_work_days: raw.work_days.unwrap_or_default(),
            preferred_hours: hours.unwrap_or_default(),
        };

        // Top-level fields win; the nested object fills whatever is missing
        match nested {
            Some(nested) => SeniorPreferenceProfile {
                preferred_location: non_empty_or(flat.preferred_location, nested.preferred_location),
                preferred_work_type: flat.preferred_work_type.or(nested.preferred_work_type),
                preferred_work_days: non_empty_or(flat.preferred_work_days, nested.preferred_work_days),
                preferred_hours: non_empty_or(flat.preferred_hours, nested.preferred_hours),
            },
            None => flat,
        }
    }
}

/// Any accepted job posting shape
///
/// Primary names are the canonical serialized keys; aliases cover the rest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawPosting {
    #[serde(alias = "job_id", alias = "jobId")]
    #[serde(deserialize_with = "lenient_string")]
    pub id: Option<String>,

    #[serde(alias = "job_title", alias = "jobTitle")]
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,

    #[serde(alias = "company_name")]
    #[serde(deserialize_with = "lenient_string")]
    pub company_name: Option<String>,

    #[serde(alias = "job_description", alias = "jobDescription")]
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,

    #[serde(alias = "workLocation", alias = "work_location")]
    #[serde(deserialize_with = "lenient_string")]
    pub location: Option<String>,

    #[serde(
        alias = "work_type",
        alias = "employment_type",
        alias = "employmentType",
        alias = "jobType",
        alias = "job_type"
    )]
    #[serde(deserialize_with = "lenient_string")]
    pub work_type: Option<String>,

    #[serde(alias = "wage_amount")]
    #[serde(deserialize_with = "lenient_amount")]
    pub wage_amount: Option<u64>,

    #[serde(alias = "work_days")]
    #[serde(deserialize_with = "lenient_days")]
    pub work_days: Option<String>,

    #[serde(alias = "work_hours")]
    #[serde(deserialize_with = "lenient_string")]
    pub work_hours: Option<String>,

    #[serde(alias = "work_period")]
    #[serde(deserialize_with = "lenient_string")]
    pub work_period: Option<String>,

    #[serde(alias = "status_name", alias = "statusName")]
    #[serde(deserialize_with = "lenient_string")]
    pub status: Option<String>,
}

impl From<RawPosting> for JobPosting {
    fn from(raw: RawPosting) -> Self {
        JobPosting {
            id: raw.id.unwrap_or_default(),
            title: raw.title.unwrap_or_default(),
            company_name: raw.company_name.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            location: raw.location.unwrap_or_default(),
            work_type: raw.work_type.as_deref().and_then(WorkType::parse),
            wage_amount: raw.wage_amount.unwrap_or(0),
            work_days: raw.work_days.unwrap_or_default(),
            work_hours: raw.work_hours.unwrap_or_default(),
            work_period: raw.work_period.unwrap_or_default(),
            status: raw
                .status
                .as_deref()
                .map(PostingStatus::parse)
                .unwrap_or_default(),
        }
    }
}

fn non_empty_or(value: String, fallback: String) -> String {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

/// Accepts strings, numbers and booleans; anything else becomes `None`
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_to_string))
}

/// Accepts a comma separated string or an array of day tokens
fn lenient_days<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .filter_map(value_to_string)
                .collect::<Vec<_>>()
                .join(","),
        ),
        Some(other) => value_to_string(other),
        None => None,
    })
}

/// Accepts numbers or numeric strings such as `"12,000"`
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64)),
        Some(Value::String(s)) => {
            let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
            digits.parse().ok()
        }
        _ => None,
    })
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
