// Calendar feed adapter
// Classifies feed summaries and pins feed instants to the fixed zone

use chrono::{SecondsFormat, Timelike};
use tracing::{debug, warn};

use crate::entities::{Event, FeedEntry};
use crate::services::datetime_resolver::{self, CLOCK_FORMAT, DATE_FORMAT, FIXED_ZONE};
use crate::services::text_classifier::TextClassifier;
use crate::utils::non_empty;
use crate::value_objects::{EventId, EventTime};

pub const EVENT_ID_PLACEHOLDER: &str = "{event_id}";
pub const DEFAULT_EVENT_URL_TEMPLATE: &str =
    "https://polandbulldogs.bigteams.com/main/event/scid/OH4451495857/eventId/{event_id}/";

#[derive(Debug, Clone)]
pub struct IcsAdapter {
    classifier: TextClassifier,
    url_template: String,
}

impl Default for IcsAdapter {
    fn default() -> Self {
        Self::new(TextClassifier::default(), DEFAULT_EVENT_URL_TEMPLATE)
    }
}

impl IcsAdapter {
    pub fn new(classifier: TextClassifier, url_template: &str) -> Self {
        Self {
            classifier,
            url_template: url_template.to_string(),
        }
    }

    pub fn event_url(&self, event_id: EventId) -> String {
        self.url_template
            .replace(EVENT_ID_PLACEHOLDER, &event_id.to_string())
    }

    pub fn adapt_all(&self, entries: &[FeedEntry]) -> Vec<Event> {
        entries.iter().filter_map(|entry| self.adapt(entry)).collect()
    }

    pub fn adapt(&self, entry: &FeedEntry) -> Option<Event> {
        let Some(classified) = self.classifier.classify(&entry.summary) else {
            debug!(uid = %entry.uid, summary = %entry.summary, "unrecognized feed summary");
            return None;
        };

        let Some(start) = entry.start else {
            warn!(uid = %entry.uid, summary = %entry.summary, "feed entry has no start; skipping");
            return None;
        };

        let Some(event_id) = EventId::from_uid(&entry.uid) else {
            warn!(uid = %entry.uid, summary = %entry.summary, "feed uid has no numeric event id; skipping");
            return None;
        };

        let local = start.with_timezone(&FIXED_ZONE);
        let date = local.format(DATE_FORMAT).to_string();
        // Feeds publish date-only games at local midnight.
        let at_midnight = local.hour() == 0 && local.minute() == 0;
        let time = if classified.time_tba_tag || at_midnight {
            EventTime::Unknown
        } else {
            EventTime::Clock(local.format(CLOCK_FORMAT).to_string())
        };

        if let Err(err) = datetime_resolver::resolve(&date, time.as_clock()) {
            warn!(
                date = %date,
                time = %time,
                title = %classified.title,
                error = %err,
                "feed entry date/time does not resolve; skipping"
            );
            return None;
        }

        Some(Event {
            event_id,
            sport: classified.sport,
            date: Some(date),
            time,
            title: classified.title,
            home_or_away: classified.home_or_away,
            location: non_empty(entry.location.as_deref()),
            opponent: Some(classified.opponent),
            result: None,
            is_cancelled: false,
            is_postponed: false,
            url: self.event_url(event_id),
            start_iso: Some(local.to_rfc3339_opts(SecondsFormat::Millis, false)),
            is_time_tba_tag: classified.time_tba_tag,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::HomeOrAway;
    use chrono::{TimeZone, Utc};

    fn entry(uid: &str, summary: &str, start: Option<(i32, u32, u32, u32, u32)>) -> FeedEntry {
        FeedEntry {
            uid: uid.to_string(),
            summary: summary.to_string(),
            start: start.map(|(y, mo, d, h, mi)| {
                Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
                    .single()
                    .expect("valid instant")
            }),
            location: Some("Bulldog Stadium".to_string()),
        }
    }

    #[test]
    fn adapts_timed_entry_in_fixed_zone() {
        // 23:00 UTC on Sep 5 is 7:00 PM EDT.
        let feed = entry(
            "4821.20250905@bigteams",
            "Poland Seminary High School Football B Home Canfield",
            Some((2025, 9, 5, 23, 0)),
        );
        let event = IcsAdapter::default().adapt(&feed).expect("event");
        assert_eq!(event.event_id, EventId(4821));
        assert_eq!(event.sport, "Football");
        assert_eq!(event.date.as_deref(), Some("09/05/2025"));
        assert_eq!(event.time, EventTime::Clock("7:00 PM".to_string()));
        assert_eq!(event.home_or_away, HomeOrAway::Home);
        assert_eq!(event.opponent.as_deref(), Some("Canfield"));
        assert_eq!(event.location.as_deref(), Some("Bulldog Stadium"));
        assert_eq!(event.start_iso.as_deref(), Some("2025-09-05T19:00:00.000-04:00"));
        assert_eq!(
            event.url,
            "https://polandbulldogs.bigteams.com/main/event/scid/OH4451495857/eventId/4821/"
        );
        assert!(!event.is_all_day());
    }

    #[test]
    fn local_midnight_becomes_unknown_time() {
        // 05:00 UTC in January is local midnight (EST).
        let feed = entry(
            "77",
            "Poland Seminary High School Basketball G Away Niles",
            Some((2026, 1, 10, 5, 0)),
        );
        let event = IcsAdapter::default().adapt(&feed).expect("event");
        assert_eq!(event.date.as_deref(), Some("01/10/2026"));
        assert!(event.time.is_unknown());
        assert!(event.is_all_day());
        assert_eq!(event.start_iso.as_deref(), Some("2026-01-10T00:00:00.000-05:00"));
    }

    #[test]
    fn tba_tag_forces_unknown_time() {
        let feed = entry(
            "90.1",
            "Time: TBA - Poland Seminary High School Softball G Away Hubbard",
            Some((2026, 4, 20, 20, 30)),
        );
        let event = IcsAdapter::default().adapt(&feed).expect("event");
        assert!(event.is_time_tba_tag);
        assert!(event.time.is_unknown());
    }

    #[test]
    fn drops_entries_without_start_id_or_classification() {
        let adapter = IcsAdapter::default();
        let summary = "Poland Seminary High School Football B Home Canfield";
        assert!(adapter.adapt(&entry("12", summary, None)).is_none());
        assert!(adapter
            .adapt(&entry("abc.def", summary, Some((2025, 9, 5, 23, 0))))
            .is_none());
        assert!(adapter
            .adapt(&entry("12", "Staff meeting", Some((2025, 9, 5, 23, 0))))
            .is_none());
    }

    #[test]
    fn custom_url_template_is_filled() {
        let adapter = IcsAdapter::new(
            TextClassifier::default(),
            "https://example.test/events/{event_id}",
        );
        assert_eq!(adapter.event_url(EventId(42)), "https://example.test/events/42");
    }
}
