/*!
 * Clock-time recognition over free text.
 *
 * Two patterns are combined into one alternation with the 12-hour form first,
 * so a time carrying a meridiem marker is always captured whole and never
 * re-captured as a bare 24-hour time at the same position.
 */

use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

// @const: 12-hour form, lenient hour (1-9 or 10-19) with AM/PM marker
const TWELVE_HOUR_PATTERN: &str =
    r"1[0-9]:[0-5][0-9]\s?[AaPp]\.?[Mm]\.?|[1-9]:[0-5][0-9]\s?[AaPp]\.?[Mm]\.?";

// @const: 24-hour form, 00:00 through 23:59 plus the literal 24:00
const TWENTY_FOUR_HOUR_PATTERN: &str = r"24:00|2[0-3]:[0-5][0-9]|1[0-9]:[0-5][0-9]|[0-9]:[0-5][0-9]";

static TIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("{}|{}", TWELVE_HOUR_PATTERN, TWENTY_FOUR_HOUR_PATTERN)).unwrap()
});

// @const: Splits a raw match into hour, minute and optional meridiem letter
static TIME_PARTS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2}):(\d{2})\s?(?:([AaPp])\.?[Mm]\.?)?$").unwrap()
});

/// Which clock convention a match was written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFormat {
    /// `3:00 PM`, `11:45 a.m.`
    TwelveHour,
    /// `14:05`, `24:00`
    TwentyFourHour,
}

impl TimeFormat {
    /// Classify a raw match by the presence of a trailing meridiem marker
    pub fn of(raw: &str) -> Self {
        let last_letter = raw.trim_end_matches('.').chars().last();
        match last_letter {
            Some('m') | Some('M') => TimeFormat::TwelveHour,
            _ => TimeFormat::TwentyFourHour,
        }
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeFormat::TwelveHour => write!(f, "12h"),
            TimeFormat::TwentyFourHour => write!(f, "24h"),
        }
    }
}

/// A substring of source text recognized as a clock time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeMatch {
    /// Matched text exactly as it appears in the source
    pub text: String,
    /// Byte offset of the match in the source text
    pub start: usize,
    /// Clock convention of the match
    pub format: TimeFormat,
}

impl TimeMatch {
    /// Convert the match to a 24-hour clock value, if it names a real time
    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        normalize_time(&self.text)
    }
}

/// Find every clock time in `text`, left to right, duplicates preserved
pub fn find_times(text: &str) -> Vec<String> {
    TIME_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Like [`find_times`] but keeps the offset and format of each match
pub fn match_times(text: &str) -> Vec<TimeMatch> {
    TIME_REGEX
        .find_iter(text)
        .map(|m| TimeMatch {
            text: m.as_str().to_string(),
            start: m.start(),
            format: TimeFormat::of(m.as_str()),
        })
        .collect()
}

/// Normalize a raw match (`"3:00 PM"`, `"14:05"`) to a 24-hour time.
///
/// Returns `None` when the lenient grammar accepted something that is not a
/// clock time, such as `"13:00 PM"`. `"24:00"` is read as midnight.
pub fn normalize_time(raw: &str) -> Option<NaiveTime> {
    let caps = TIME_PARTS_REGEX.captures(raw.trim())?;
    let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minute: u32 = caps.get(2)?.as_str().parse().ok()?;

    let hour = match caps.get(3).map(|m| m.as_str().to_ascii_lowercase()) {
        Some(meridiem) => {
            if hour == 0 || hour > 12 {
                return None;
            }
            match (meridiem.as_str(), hour) {
                ("a", 12) => 0,
                ("a", h) => h,
                (_, 12) => 12,
                (_, h) => h + 12,
            }
        }
        None if hour == 24 && minute == 0 => 0,
        None => hour,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Format a normalized time the way exported records carry it (`HH:MM:SS`)
pub fn format_time24(time: &NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}
