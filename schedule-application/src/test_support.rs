// In-memory port fakes for command tests

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::json;

use crate::{AppState, Metrics};
use schedule_domain::ports::{RawPayload, ScheduleSource, ScheduleStore, SourceRequest, TeamCatalog};
use schedule_domain::{
    Event, FeedEntry, RuntimeConfig, ScheduleNode, SourceMode, TeamRef, DEFAULT_CALENDAR_NAME,
    DEFAULT_EVENT_URL_TEMPLATE, DEFAULT_INSTITUTION_NAME, DEFAULT_SUMMARY_MARKER,
    DEFAULT_UID_DOMAIN,
};

/// Football answers with a duplicated game and a practice, softball always fails.
pub struct FakeSource;

#[async_trait]
impl ScheduleSource for FakeSource {
    async fn fetch_raw(&self, request: &SourceRequest) -> anyhow::Result<RawPayload> {
        match request {
            SourceRequest::Team(team) if team.sport == "softball" => {
                anyhow::bail!("upstream returned 502")
            }
            SourceRequest::Team(team) => {
                let nodes: Vec<ScheduleNode> = serde_json::from_value(json!([
                    {"eventId": 10, "eventType": "Game", "eventDate": "09/05/2025",
                     "eventTime": "7:00 PM", "homeOrAway": "Home",
                     "participants": [{"school": {"name": "Canfield"}}]},
                    {"eventId": 10, "eventType": "Game", "eventDate": "09/05/2025",
                     "eventTime": "7:00 PM", "homeOrAway": "Home",
                     "participants": [{"school": {"name": "Canfield"}}]},
                    {"eventId": 11, "eventType": "Practice", "eventDate": "09/06/2025"}
                ]))?;
                Ok(RawPayload::Schedule {
                    team: team.clone(),
                    nodes,
                })
            }
            SourceRequest::Feed => Ok(RawPayload::Feed(vec![
                FeedEntry {
                    uid: "10.ics".to_string(),
                    summary: "Poland Seminary High School Football B Away Boardman".to_string(),
                    start: Utc.with_ymd_and_hms(2025, 9, 12, 23, 0, 0).single(),
                    location: None,
                },
                FeedEntry {
                    uid: "12.ics".to_string(),
                    summary: "PTA meeting".to_string(),
                    start: Utc.with_ymd_and_hms(2025, 9, 12, 23, 0, 0).single(),
                    location: None,
                },
            ])),
        }
    }
}

pub struct FakeCatalog(pub Option<Vec<TeamRef>>);

#[async_trait]
impl TeamCatalog for FakeCatalog {
    async fn list_teams(&self) -> anyhow::Result<Vec<TeamRef>> {
        self.0
            .clone()
            .ok_or_else(|| anyhow::anyhow!("teams.json missing"))
    }
}

/// Keeps every write in memory, keyed by output name.
#[derive(Default)]
pub struct RecordingStore {
    pub json: Mutex<BTreeMap<String, Vec<Event>>>,
    pub calendar: Mutex<Option<String>>,
    pub fail_combined: bool,
}

impl RecordingStore {
    pub fn written(&self, name: &str) -> Option<Vec<Event>> {
        self.json.lock().expect("lock").get(name).cloned()
    }

    fn record(&self, name: &str, events: &[Event]) {
        self.json
            .lock()
            .expect("lock")
            .insert(name.to_string(), events.to_vec());
    }
}

#[async_trait]
impl ScheduleStore for RecordingStore {
    async fn write_combined(&self, events: &[Event]) -> anyhow::Result<()> {
        if self.fail_combined {
            anyhow::bail!("disk full");
        }
        self.record("combined", events);
        Ok(())
    }

    async fn write_sport(&self, slug: &str, events: &[Event]) -> anyhow::Result<()> {
        self.record(slug, events);
        Ok(())
    }

    async fn write_cancelled_today(&self, events: &[Event]) -> anyhow::Result<()> {
        self.record("cancelled-today", events);
        Ok(())
    }

    async fn write_calendar(&self, document: &str) -> anyhow::Result<()> {
        *self.calendar.lock().expect("lock") = Some(document.to_string());
        Ok(())
    }
}

pub fn team(sport: &str, title: &str) -> TeamRef {
    TeamRef {
        id: "1".to_string(),
        sport: sport.to_string(),
        sport_title: title.to_string(),
        gender_id: "1".to_string(),
        sport_id: "2".to_string(),
        season_id: "3".to_string(),
    }
}

pub fn runtime_config(mode: SourceMode) -> RuntimeConfig {
    RuntimeConfig {
        source_mode: mode,
        institution_name: DEFAULT_INSTITUTION_NAME.to_string(),
        summary_marker: DEFAULT_SUMMARY_MARKER.to_string(),
        event_url_template: DEFAULT_EVENT_URL_TEMPLATE.to_string(),
        calendar_name: DEFAULT_CALENDAR_NAME.to_string(),
        uid_domain: DEFAULT_UID_DOMAIN.to_string(),
    }
}

pub fn state_with_store(
    mode: SourceMode,
    teams: Option<Vec<TeamRef>>,
    store: RecordingStore,
) -> (AppState, Arc<RecordingStore>) {
    let store = Arc::new(store);
    let state = AppState {
        config: runtime_config(mode),
        source: Arc::new(FakeSource),
        team_catalog: Arc::new(FakeCatalog(teams)),
        store: store.clone(),
        metrics: Arc::new(Metrics::default()),
    };
    (state, store)
}

pub fn state(mode: SourceMode, teams: Option<Vec<TeamRef>>) -> (AppState, Arc<RecordingStore>) {
    state_with_store(mode, teams, RecordingStore::default())
}
