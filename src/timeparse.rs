//! Free-text time expressions
//!
//! Recognized forms, tried in order (first match wins):
//!
//! 1. `5pm`, `5:30 PM`, `remind me at 11am please`
//! 2. `17:30`
//! 3. `in 20 minutes`, `in 2 hrs`
//!
//! Clock forms resolve to the next occurrence strictly after `now`; the
//! relative form is added to `now` as-is. All times are local wall-clock
//! (`NaiveDateTime`).

use chrono::{Duration, Local, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

/// Storage format for timestamps (`2024-05-01T17:00:00`, fraction omitted when zero)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Compiled time expression patterns
pub struct TimeParser {
    meridiem: Regex,
    clock: Regex,
    relative: Regex,
}

impl TimeParser {
    pub fn new() -> Self {
        Self {
            meridiem: Regex::new(r"(\d{1,2})(?::(\d{2}))?\s*(am|pm)").expect("valid meridiem pattern"),
            clock: Regex::new(r"(\d{1,2}):(\d{2})").expect("valid clock pattern"),
            relative: Regex::new(r"in\s+(\d+)\s*(minute|hour|min|hr)s?")
                .expect("valid relative pattern"),
        }
    }

    /// Parse `text` relative to `now`. Returns `None` for anything that is
    /// not a recognized, valid time expression.
    ///
    /// With `am`/`pm` only hours 1 through 12 are accepted, so `0am` and
    /// `13pm` yield `None` rather than being read as 24-hour times. A form
    /// that matches but describes an impossible time does not fall through
    /// to the later forms.
    pub fn parse(&self, text: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let text = text.trim().to_lowercase();

        if let Some(caps) = self.meridiem.captures(&text) {
            let hour: u32 = caps[1].parse().ok()?;
            let minute: u32 = match caps.get(2) {
                Some(m) => m.as_str().parse().ok()?,
                None => 0,
            };
            if !(1..=12).contains(&hour) {
                return None;
            }
            let hour = match (&caps[3], hour) {
                ("am", 12) => 0,
                ("pm", 12) => 12,
                ("pm", h) => h + 12,
                (_, h) => h,
            };
            return next_occurrence(now, hour, minute);
        }

        if let Some(caps) = self.clock.captures(&text) {
            let hour: u32 = caps[1].parse().ok()?;
            let minute: u32 = caps[2].parse().ok()?;
            return next_occurrence(now, hour, minute);
        }

        if let Some(caps) = self.relative.captures(&text) {
            let amount: i64 = caps[1].parse().ok()?;
            let delta = match &caps[2] {
                "minute" | "min" => Duration::try_minutes(amount)?,
                _ => Duration::try_hours(amount)?,
            };
            return now.checked_add_signed(delta);
        }

        None
    }
}

impl Default for TimeParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse with a shared [`TimeParser`]
pub fn parse_time(text: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    static PARSER: OnceLock<TimeParser> = OnceLock::new();
    PARSER.get_or_init(TimeParser::new).parse(text, now)
}

/// Today's `hour:minute:00`, or tomorrow's if that is not after `now`
fn next_occurrence(now: NaiveDateTime, hour: u32, minute: u32) -> Option<NaiveDateTime> {
    let target = now.date().and_hms_opt(hour, minute, 0)?;
    if target > now {
        Some(target)
    } else {
        target.checked_add_signed(Duration::days(1))
    }
}

/// Current local wall-clock time
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored timestamp; accepts a space instead of `T` as separator
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    value
        .parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_meridiem_later_today() {
        assert_eq!(parse_time("5pm", at(1, 14, 0)), Some(at(1, 17, 0)));
    }

    #[test]
    fn test_meridiem_rolls_to_tomorrow() {
        assert_eq!(parse_time("5pm", at(1, 18, 0)), Some(at(2, 17, 0)));
    }

    #[test]
    fn test_exactly_now_rolls_forward() {
        assert_eq!(parse_time("5pm", at(1, 17, 0)), Some(at(2, 17, 0)));
        assert_eq!(parse_time("17:00", at(1, 17, 0)), Some(at(2, 17, 0)));
    }

    #[test]
    fn test_meridiem_with_minutes_and_surrounding_text() {
        assert_eq!(
            parse_time("Remind me at 5:30 PM please", at(1, 9, 0)),
            Some(at(1, 17, 30))
        );
        assert_eq!(parse_time("9am", at(1, 8, 0)), Some(at(1, 9, 0)));
    }

    #[test]
    fn test_twelve_oclock_normalization() {
        assert_eq!(parse_time("12am", at(1, 8, 0)), Some(at(2, 0, 0)));
        assert_eq!(parse_time("12pm", at(1, 8, 0)), Some(at(1, 12, 0)));
        assert_eq!(parse_time("12:15am", at(1, 0, 0)), Some(at(1, 0, 15)));
    }

    #[test]
    fn test_invalid_meridiem_hour() {
        assert_eq!(parse_time("13pm", at(1, 8, 0)), None);
        assert_eq!(parse_time("0am", at(1, 8, 0)), None);
        assert_eq!(parse_time("5:75pm", at(1, 8, 0)), None);
    }

    #[test]
    fn test_24_hour_clock() {
        assert_eq!(parse_time("17:30", at(1, 10, 0)), Some(at(1, 17, 30)));
        assert_eq!(parse_time("at 7:05", at(1, 10, 0)), Some(at(2, 7, 5)));
        assert_eq!(parse_time("25:00", at(1, 10, 0)), None);
    }

    #[test]
    fn test_relative_duration_is_exact() {
        let now = at(1, 10, 0) + Duration::seconds(42) + Duration::milliseconds(5);
        assert_eq!(parse_time("in 2 hours", now), Some(now + Duration::hours(2)));
        assert_eq!(parse_time("in 1 hour", now), Some(now + Duration::hours(1)));
        assert_eq!(parse_time("IN 30 Minutes", now), Some(now + Duration::minutes(30)));
        assert_eq!(parse_time("in 5 min", now), Some(now + Duration::minutes(5)));
        assert_eq!(parse_time("in 3 hrs", now), Some(now + Duration::hours(3)));
    }

    #[test]
    fn test_relative_overflow_is_none() {
        assert_eq!(parse_time("in 99999999999999999999 minutes", at(1, 10, 0)), None);
        assert_eq!(parse_time("in 9223372036854775807 hours", at(1, 10, 0)), None);
    }

    #[test]
    fn test_priority_order() {
        // Meridiem beats the 24-hour form
        assert_eq!(parse_time("5:30pm", at(1, 10, 0)), Some(at(1, 17, 30)));
        // Clock beats the relative form
        assert_eq!(parse_time("in 2 hours or 11:00", at(1, 10, 0)), Some(at(1, 11, 0)));
    }

    #[test]
    fn test_unrecognized() {
        let now = at(1, 10, 0);
        assert_eq!(parse_time("nonsense", now), None);
        assert_eq!(parse_time("", now), None);
        assert_eq!(parse_time("tomorrow", now), None);
        assert_eq!(parse_time("in a while", now), None);
    }

    #[test]
    fn test_timestamp_format() {
        let t = at(1, 17, 0);
        assert_eq!(format_timestamp(t), "2024-05-01T17:00:00");
        assert_eq!(parse_timestamp("2024-05-01T17:00:00"), Some(t));
        assert_eq!(parse_timestamp("2024-05-01 17:00:00"), Some(t));

        let fractional = t + Duration::microseconds(250);
        assert_eq!(parse_timestamp(&format_timestamp(fractional)), Some(fractional));

        assert_eq!(parse_timestamp("yesterday"), None);
    }
}
