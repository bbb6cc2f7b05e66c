// Date/time resolution for schedule rows
// Turns (date, time) text into a timed span or an all-day marker in the fixed zone

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

use crate::value_objects::is_unknown_time;

pub const FIXED_ZONE: Tz = chrono_tz::America::New_York;
pub const FIXED_ZONE_ID: &str = "America/New_York";
pub const EVENT_DURATION_HOURS: i64 = 2;
pub const DATE_FORMAT: &str = "%m/%d/%Y";
pub const CLOCK_FORMAT: &str = "%-I:%M %p";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("unparseable date/time: date={date:?} time={time:?}")]
    UnparseableDateTime { date: String, time: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTime {
    pub start: DateTime<Tz>,
    pub end: Option<DateTime<Tz>>,
    pub all_day: bool,
}

impl ResolvedTime {
    pub fn timed(start: DateTime<Tz>) -> Self {
        Self {
            start,
            end: Some(start + Duration::hours(EVENT_DURATION_HOURS)),
            all_day: false,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.start.date_naive()
    }
}

/// A named date+time grammar. Rules are tried in declaration order.
pub struct GrammarRule {
    pub name: &'static str,
    pub parse: fn(&str) -> Option<DateTime<Tz>>,
}

pub static TIMED_GRAMMAR: [GrammarRule; 3] = [
    GrammarRule {
        name: "padded-date-12h",
        parse: padded_date_12h,
    },
    GrammarRule {
        name: "unpadded-date-12h",
        parse: unpadded_date_12h,
    },
    GrammarRule {
        name: "unpadded-date-12h-seconds",
        parse: unpadded_date_12h_seconds,
    },
];

static PADDED_12H: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4} \d{1,2}:\d{2} [AP]M$").expect("valid regex"));
static UNPADDED_12H: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{4} \d{1,2}:\d{2} [AP]M$").expect("valid regex"));
static UNPADDED_12H_SECONDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{1,2}/\d{1,2}/\d{4} \d{1,2}:\d{2}:\d{2} [AP]M$").expect("valid regex")
});
static MERIDIEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*([ap])\.?\s*m\.?$").expect("valid regex"));

fn padded_date_12h(input: &str) -> Option<DateTime<Tz>> {
    parse_gated(&PADDED_12H, input, "%m/%d/%Y %I:%M %p")
}

fn unpadded_date_12h(input: &str) -> Option<DateTime<Tz>> {
    parse_gated(&UNPADDED_12H, input, "%m/%d/%Y %I:%M %p")
}

fn unpadded_date_12h_seconds(input: &str) -> Option<DateTime<Tz>> {
    parse_gated(&UNPADDED_12H_SECONDS, input, "%m/%d/%Y %I:%M:%S %p")
}

fn parse_gated(shape: &Regex, input: &str, format: &str) -> Option<DateTime<Tz>> {
    if !shape.is_match(input) {
        return None;
    }
    NaiveDateTime::parse_from_str(input, format)
        .ok()
        .and_then(localize)
}

/// Pins a wall-clock time to the fixed zone. Gaps are invalid, overlaps take the earlier instant.
pub fn localize(naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    FIXED_ZONE.from_local_datetime(&naive).earliest()
}

pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).ok()
}

pub fn local_midnight(date: NaiveDate) -> Option<DateTime<Tz>> {
    date.and_hms_opt(0, 0, 0).and_then(localize)
}

/// `"7:30pm"`, `"7:30  p.m."` -> `"7:30 PM"`.
pub fn normalize_clock(time: &str) -> String {
    let collapsed = time.split_whitespace().collect::<Vec<_>>().join(" ");
    MERIDIEM
        .replace(&collapsed, |caps: &Captures| {
            format!(" {}M", caps[1].to_uppercase())
        })
        .into_owned()
}

pub fn resolve(date: &str, time: Option<&str>) -> Result<ResolvedTime, ResolveError> {
    let invalid = || ResolveError::UnparseableDateTime {
        date: date.to_string(),
        time: time.unwrap_or_default().to_string(),
    };

    match time.filter(|value| !is_unknown_time(value)) {
        None => {
            let start = parse_date(date).and_then(local_midnight).ok_or_else(invalid)?;
            Ok(ResolvedTime {
                start,
                end: None,
                all_day: true,
            })
        }
        Some(clock) => {
            let input = format!("{} {}", date.trim(), normalize_clock(clock));
            TIMED_GRAMMAR
                .iter()
                .find_map(|rule| (rule.parse)(&input))
                .map(ResolvedTime::timed)
                .ok_or_else(invalid)
        }
    }
}
