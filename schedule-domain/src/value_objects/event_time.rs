// Event time value object

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Sentinel written for events whose start time is not known yet.
pub const UNKNOWN_TIME: &str = "TBA";

/// Either a clock time as published upstream or the "unknown" sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum EventTime {
    Clock(String),
    #[default]
    Unknown,
}

impl EventTime {
    /// Placeholders (`TBA`, `TBD`, `NA`, blank) collapse to `Unknown`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(value) if !is_unknown_time(value) => EventTime::Clock(value.to_string()),
            _ => EventTime::Unknown,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, EventTime::Unknown)
    }

    pub fn as_clock(&self) -> Option<&str> {
        match self {
            EventTime::Clock(value) => Some(value.as_str()),
            EventTime::Unknown => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EventTime::Clock(value) => value.as_str(),
            EventTime::Unknown => UNKNOWN_TIME,
        }
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EventTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(EventTime::parse(raw.as_deref()))
    }
}

/// True for blank input and the `TBA`/`TBD`/`NA` placeholders in any case.
pub fn is_unknown_time(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("TBA")
        || trimmed.eq_ignore_ascii_case("TBD")
        || trimmed.eq_ignore_ascii_case("NA")
}
