// Identifier value objects

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Upstream event identifier. Unique within one source's result set only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EventId(pub i64);

impl EventId {
    /// Parses the leading numeric token of a feed UID (`"123456.ics@host"` -> `123456`).
    pub fn from_uid(uid: &str) -> Option<Self> {
        uid.trim()
            .split(['.', '@'])
            .next()
            .and_then(|token| token.trim().parse::<i64>().ok())
            .map(EventId)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// The schedule API is not consistent about quoting ids.
impl<'de> Deserialize<'de> for EventId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(i64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(EventId(value)),
            Repr::Text(text) => text
                .trim()
                .parse::<i64>()
                .map(EventId)
                .map_err(|err| serde::de::Error::custom(format!("invalid event id '{text}': {err}"))),
        }
    }
}
