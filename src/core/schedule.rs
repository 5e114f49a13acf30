use chrono::Weekday;
use std::collections::HashSet;

const MINUTES_PER_HOUR: u32 = 60;

/// A same-day working window in minutes since midnight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: u32,
    pub end: u32,
}

impl TimeRange {
    /// Length of the window in minutes; overnight or empty windows are 0
    #[inline]
    pub fn duration(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Minutes shared with another window
    #[inline]
    pub fn overlap(&self, other: &TimeRange) -> u32 {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        end.saturating_sub(start)
    }
}

/// Map a single day token to a weekday
///
/// Accepts English abbreviations and names in any case and Korean day
/// names with or without the `요일` suffix.
pub fn parse_weekday(token: &str) -> Option<Weekday> {
    let token = token.trim().to_uppercase();
    let day = match token.as_str() {
        "MON" | "MONDAY" | "월" | "월요일" => Weekday::Mon,
        "TUE" | "TUES" | "TUESDAY" | "화" | "화요일" => Weekday::Tue,
        "WED" | "WEDNESDAY" | "수" | "수요일" => Weekday::Wed,
        "THU" | "THUR" | "THURS" | "THURSDAY" | "목" | "목요일" => Weekday::Thu,
        "FRI" | "FRIDAY" | "금" | "금요일" => Weekday::Fri,
        "SAT" | "SATURDAY" | "토" | "토요일" => Weekday::Sat,
        "SUN" | "SUNDAY" | "일" | "일요일" => Weekday::Sun,
        _ => return None,
    };
    Some(day)
}

/// Parse a day list such as `"MON,WED,FRI"` or `"월, 수, 금"` into a set
///
/// Group words (`평일`, `주말`, `WEEKDAYS`, `WEEKEND`) expand to their days
/// and run-together Korean day characters (`"월수금"`) are split. Unknown
/// tokens are dropped.
pub fn parse_work_days(raw: &str) -> HashSet<Weekday> {
    let mut days = HashSet::new();

    for token in raw.split(|c: char| c == ',' || c == '/' || c == '·' || c.is_whitespace()) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        if let Some(day) = parse_weekday(token) {
            days.insert(day);
            continue;
        }

        match token.to_uppercase().as_str() {
            "평일" | "WEEKDAYS" | "WEEKDAY" => {
                days.extend([Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri]);
            }
            "주말" | "WEEKEND" | "WEEKENDS" => {
                days.extend([Weekday::Sat, Weekday::Sun]);
            }
            _ => {
                let run: Option<Vec<Weekday>> = token
                    .chars()
                    .map(|c| parse_weekday(c.encode_utf8(&mut [0; 4])))
                    .collect();
                if let Some(run) = run {
                    days.extend(run);
                }
            }
        }
    }

    days
}

/// Parse a clock value `HH:MM` into minutes since midnight
fn parse_clock(raw: &str) -> Option<u32> {
    let (hours, minutes) = raw.trim().split_once(':')?;
    let hours: u32 = hours.trim().parse().ok()?;
    let minutes: u32 = minutes.trim().parse().ok()?;

    if minutes >= MINUTES_PER_HOUR || hours > 24 || (hours == 24 && minutes > 0) {
        return None;
    }

    Some(hours * MINUTES_PER_HOUR + minutes)
}

/// Parse a `HH:MM-HH:MM` range
///
/// Returns `None` when the separator or either clock value is missing or
/// malformed. A range whose end precedes its start still parses; its
/// duration is simply 0.
pub fn parse_time_range(raw: &str) -> Option<TimeRange> {
    let (start, end) = raw.split_once('-')?;
    Some(TimeRange {
        start: parse_clock(start)?,
        end: parse_clock(end)?,
    })
}
