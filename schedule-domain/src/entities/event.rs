// Event entity
// Canonical schedule entry shared by every source adapter and output

use serde::{Deserialize, Serialize};

use crate::value_objects::{EventId, EventTime, HomeOrAway};

/// Opponent shown when upstream did not name one.
pub const DEFAULT_OPPONENT: &str = "TBD";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "EventRecord", from = "EventRecord")]
pub struct Event {
    pub event_id: EventId,
    pub sport: String,
    pub date: Option<String>,
    pub time: EventTime,
    pub title: String,
    pub home_or_away: HomeOrAway,
    pub location: Option<String>,
    pub opponent: Option<String>,
    pub result: Option<String>,
    pub is_cancelled: bool,
    pub is_postponed: bool,
    pub url: String,
    pub start_iso: Option<String>,
    pub is_time_tba_tag: bool,
}

impl Event {
    pub fn vs_or_at(&self) -> &'static str {
        self.home_or_away.vs_or_at()
    }

    pub fn opponent_or_default(&self) -> &str {
        self.opponent.as_deref().unwrap_or(DEFAULT_OPPONENT)
    }

    pub fn location_or_opponent(&self) -> &str {
        self.location
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| self.opponent_or_default())
    }

    pub fn has_date(&self) -> bool {
        self.date
            .as_deref()
            .map(|value| !value.trim().is_empty())
            .unwrap_or(false)
    }

    /// Cancelled, postponed and dateless events never reach an output.
    pub fn is_schedulable(&self) -> bool {
        !self.is_cancelled && !self.is_postponed && self.has_date()
    }

    /// All-day when the feed tagged the time as TBA or the time is unknown.
    pub fn is_all_day(&self) -> bool {
        self.is_time_tba_tag || self.time.is_unknown()
    }
}

/// JSON shape of an event. `vsOrAt` is written for consumers and ignored on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub event_id: EventId,
    pub sport: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: EventTime,
    pub title: String,
    pub home_or_away: HomeOrAway,
    #[serde(default)]
    pub vs_or_at: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub opponent: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub is_cancelled: bool,
    #[serde(default)]
    pub is_postponed: bool,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "startISO", default, skip_serializing_if = "Option::is_none")]
    pub start_iso: Option<String>,
    #[serde(rename = "isTimeTBATag", default, skip_serializing_if = "is_false")]
    pub is_time_tba_tag: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl From<Event> for EventRecord {
    fn from(event: Event) -> Self {
        let vs_or_at = event.vs_or_at().to_string();
        Self {
            event_id: event.event_id,
            sport: event.sport,
            date: event.date,
            time: event.time,
            title: event.title,
            home_or_away: event.home_or_away,
            vs_or_at: Some(vs_or_at),
            location: event.location,
            opponent: event.opponent,
            result: event.result,
            is_cancelled: event.is_cancelled,
            is_postponed: event.is_postponed,
            url: event.url,
            start_iso: event.start_iso,
            is_time_tba_tag: event.is_time_tba_tag,
        }
    }
}

impl From<EventRecord> for Event {
    fn from(record: EventRecord) -> Self {
        Self {
            event_id: record.event_id,
            sport: record.sport,
            date: record.date,
            time: record.time,
            title: record.title,
            home_or_away: record.home_or_away,
            location: record.location,
            opponent: record.opponent,
            result: record.result,
            is_cancelled: record.is_cancelled,
            is_postponed: record.is_postponed,
            url: record.url,
            start_iso: record.start_iso,
            is_time_tba_tag: record.is_time_tba_tag,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::event;
    use super::*;

    #[test]
    fn serializes_camel_case_with_derived_vs_or_at() {
        let mut away = event(7, "09/05/2025", "7:00 PM");
        away.home_or_away = HomeOrAway::Away;
        let value = serde_json::to_value(&away).expect("serialize");
        assert_eq!(value["eventId"], 7);
        assert_eq!(value["homeOrAway"], "Away");
        assert_eq!(value["vsOrAt"], "@");
        assert_eq!(value["time"], "7:00 PM");
        assert_eq!(value["isCancelled"], false);
        assert!(value.get("startISO").is_none());
    }

    #[test]
    fn stored_vs_or_at_is_ignored_on_read() {
        let json = r#"{
            "eventId": 3,
            "sport": "Softball",
            "date": "04/01/2026",
            "time": "TBA",
            "title": "Canfield",
            "homeOrAway": "Home",
            "vsOrAt": "@",
            "opponent": "Canfield",
            "url": "https://example.test"
        }"#;
        let parsed: Event = serde_json::from_str(json).expect("deserialize");
        assert_eq!(parsed.vs_or_at(), "vs");
        assert!(parsed.time.is_unknown());
        assert!(parsed.is_all_day());
    }

    #[test]
    fn location_falls_back_to_opponent_then_default() {
        let mut game = event(1, "09/05/2025", "7:00 PM");
        assert_eq!(game.location_or_opponent(), "Canfield");
        game.location = Some("Bulldog Stadium".to_string());
        assert_eq!(game.location_or_opponent(), "Bulldog Stadium");
        game.location = None;
        game.opponent = None;
        assert_eq!(game.location_or_opponent(), DEFAULT_OPPONENT);
    }

    #[test]
    fn schedulable_requires_date_and_live_status() {
        let mut game = event(1, "09/05/2025", "7:00 PM");
        assert!(game.is_schedulable());
        game.date = Some("  ".to_string());
        assert!(!game.is_schedulable());
        game.date = Some("09/05/2025".to_string());
        game.is_postponed = true;
        assert!(!game.is_schedulable());
    }
}
