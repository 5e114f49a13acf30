// Core algorithm exports
pub mod location;
pub mod matcher;
pub mod schedule;
pub mod scoring;

pub use location::{locations_match, normalize_location};
pub use matcher::{Matcher, RecommendationResult};
pub use schedule::{parse_time_range, parse_weekday, parse_work_days, TimeRange};
pub use scoring::calculate_match_score;
