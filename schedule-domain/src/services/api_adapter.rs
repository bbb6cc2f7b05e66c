// Schedule API adapter
// Maps one team-schedule node onto the canonical event

use crate::entities::{Event, ScheduleNode, TeamRef};
use crate::services::text_classifier::OPEN_PLACEHOLDER;
use crate::utils::non_empty;
use crate::value_objects::{EventTime, HomeOrAway};

pub const DEFAULT_INSTITUTION_NAME: &str = "Poland Seminary";
const EXCLUDED_EVENT_TYPES: [&str; 3] = ["Practice", "Scrimmage", "School"];
const FALLBACK_TITLE: &str = "Game";

#[derive(Debug, Clone)]
pub struct ApiAdapter {
    institution_name: String,
}

impl Default for ApiAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_INSTITUTION_NAME)
    }
}

impl ApiAdapter {
    pub fn new(institution_name: &str) -> Self {
        Self {
            institution_name: institution_name.trim().to_string(),
        }
    }

    pub fn adapt_all(&self, nodes: &[ScheduleNode], team: &TeamRef) -> Vec<Event> {
        nodes
            .iter()
            .filter_map(|node| self.adapt(node, team))
            .collect()
    }

    /// `None` for practices, scrimmages and school-calendar rows.
    pub fn adapt(&self, node: &ScheduleNode, team: &TeamRef) -> Option<Event> {
        if is_non_competitive(node) {
            return None;
        }

        let mut opponent = self.opponent_of(node);
        let location = node
            .facility
            .as_ref()
            .and_then(|facility| facility.facility.as_ref())
            .and_then(|facility| non_empty(facility.name.as_deref()));
        let node_title = non_empty(node.title.as_deref());
        let title = node_title
            .clone()
            .or_else(|| opponent.clone())
            .unwrap_or_else(|| FALLBACK_TITLE.to_string());

        if node_title.is_some()
            && opponent
                .as_deref()
                .map(|name| name.eq_ignore_ascii_case(OPEN_PLACEHOLDER))
                .unwrap_or(false)
        {
            opponent = Some(title.clone());
        }

        let results = node.results.clone().unwrap_or_default();

        Some(Event {
            event_id: node.event_id,
            sport: team.sport_title.clone(),
            date: non_empty(node.event_date.as_deref()),
            time: EventTime::parse(node.event_time.as_deref()),
            title,
            home_or_away: HomeOrAway::from(node.home_or_away.as_deref().unwrap_or_default()),
            location,
            opponent,
            result: non_empty(results.result.as_deref()),
            is_cancelled: results.is_cancelled.unwrap_or(false),
            is_postponed: results.is_postponed.unwrap_or(false),
            url: node.url.clone().unwrap_or_default(),
            start_iso: None,
            is_time_tba_tag: false,
        })
    }

    // First participant that is not us; left empty rather than invented.
    fn opponent_of(&self, node: &ScheduleNode) -> Option<String> {
        node.participants
            .iter()
            .find(|participant| {
                participant
                    .school
                    .as_ref()
                    .and_then(|school| school.name.as_deref())
                    != Some(self.institution_name.as_str())
            })
            .and_then(|participant| participant.school.as_ref())
            .and_then(|school| non_empty(school.name.as_deref()))
    }
}

fn is_non_competitive(node: &ScheduleNode) -> bool {
    let by_type = node
        .event_type
        .as_deref()
        .map(|kind| EXCLUDED_EVENT_TYPES.contains(&kind.trim()))
        .unwrap_or(false);
    let by_title = node
        .title
        .as_deref()
        .map(|title| {
            let lowered = title.to_lowercase();
            lowered.contains("practice") || lowered.contains("scrimmage")
        })
        .unwrap_or(false);
    by_type || by_title || node.is_scrimmage == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::EventId;
    use serde_json::json;

    fn team() -> TeamRef {
        TeamRef {
            id: "1161".to_string(),
            sport: "football".to_string(),
            sport_title: "Football".to_string(),
            gender_id: "1".to_string(),
            sport_id: "4".to_string(),
            season_id: "10".to_string(),
        }
    }

    fn node(value: serde_json::Value) -> ScheduleNode {
        serde_json::from_value(value).expect("node")
    }

    #[test]
    fn maps_game_node() {
        let game = node(json!({
            "eventId": 501,
            "eventType": "Game",
            "eventDate": "09/05/2025",
            "eventTime": "7:00 PM",
            "homeOrAway": "Home",
            "participants": [
                {"school": {"name": "Poland Seminary"}},
                {"school": {"name": "Canfield"}}
            ],
            "facility": {"facility": {"name": "Bulldog Stadium"}},
            "results": {"result": "W 21-14", "isCancelled": false, "isPostponed": false},
            "url": "https://polandbulldogs.org/main/event/501"
        }));
        let event = ApiAdapter::default().adapt(&game, &team()).expect("event");
        assert_eq!(event.event_id, EventId(501));
        assert_eq!(event.sport, "Football");
        assert_eq!(event.opponent.as_deref(), Some("Canfield"));
        assert_eq!(event.title, "Canfield");
        assert_eq!(event.location.as_deref(), Some("Bulldog Stadium"));
        assert_eq!(event.vs_or_at(), "vs");
        assert_eq!(event.result.as_deref(), Some("W 21-14"));
        assert_eq!(event.time, EventTime::Clock("7:00 PM".to_string()));
        assert!(event.start_iso.is_none());
    }

    #[test]
    fn excludes_non_competitive_rows() {
        let adapter = ApiAdapter::default();
        for value in [
            json!({"eventId": 1, "eventType": "Practice"}),
            json!({"eventId": 2, "eventType": "School"}),
            json!({"eventId": 3, "eventType": "Game", "title": "Open Gym Practice"}),
            json!({"eventId": 4, "eventType": "Game", "title": "Preseason SCRIMMAGE"}),
            json!({"eventId": 5, "eventType": "Game", "isScrimmage": true}),
        ] {
            assert!(adapter.adapt(&node(value), &team()).is_none());
        }
    }

    #[test]
    fn missing_opponent_is_not_fabricated() {
        let game = node(json!({
            "eventId": 9,
            "eventDate": "10/01/2025",
            "eventTime": "TBA",
            "homeOrAway": "Away",
            "participants": [{"school": {"name": "Poland Seminary"}}]
        }));
        let event = ApiAdapter::default().adapt(&game, &team()).expect("event");
        assert!(event.opponent.is_none());
        assert_eq!(event.opponent_or_default(), "TBD");
        assert_eq!(event.title, "Game");
        assert!(event.time.is_unknown());
        assert_eq!(event.vs_or_at(), "@");
    }

    #[test]
    fn open_opponent_takes_node_title() {
        let game = node(json!({
            "eventId": 10,
            "eventDate": "10/11/2025",
            "title": " Kiely Cup ",
            "homeOrAway": "Home",
            "participants": [{"school": {"name": "OPEN"}}]
        }));
        let event = ApiAdapter::default().adapt(&game, &team()).expect("event");
        assert_eq!(event.title, "Kiely Cup");
        assert_eq!(event.opponent.as_deref(), Some("Kiely Cup"));
    }

    #[test]
    fn carries_status_flags() {
        let game = node(json!({
            "eventId": 11,
            "eventDate": "10/12/2025",
            "results": {"isCancelled": true}
        }));
        let event = ApiAdapter::default().adapt(&game, &team()).expect("event");
        assert!(event.is_cancelled);
        assert!(!event.is_postponed);
        assert!(!event.is_schedulable());
    }
}
