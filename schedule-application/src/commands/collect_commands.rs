use futures_util::future::join_all;
use tracing::{info, warn};

use crate::AppState;
use schedule_domain::ports::{RawPayload, SourceRequest};
use schedule_domain::services::pipeline;
use schedule_domain::{ApiAdapter, Event, IcsAdapter, TeamRef, TextClassifier};

/// Result of one upstream fetch. Failures are values so one bad source never aborts the run.
#[derive(Debug, Clone)]
pub enum SourceOutcome {
    Fetched { label: String, payload: RawPayload },
    Failed { label: String, reason: String },
}

#[derive(Debug, Clone, Default)]
pub struct CollectedEvents {
    /// Deduplicated per source pool; not yet filtered or sorted.
    pub events: Vec<Event>,
    /// Empty when the team catalog could not be read.
    pub teams: Vec<TeamRef>,
}

pub async fn collect_events(state: &AppState) -> CollectedEvents {
    let teams = match state.team_catalog.list_teams().await {
        Ok(teams) => teams,
        Err(err) => {
            warn!("failed to load team catalog: {:#}", err);
            Vec::new()
        }
    };

    let mut requests = Vec::new();
    if state.config.source_mode.uses_api() {
        requests.extend(teams.iter().cloned().map(SourceRequest::Team));
    }
    if state.config.source_mode.uses_feed() {
        requests.push(SourceRequest::Feed);
    }

    let outcomes = fetch_all(state, &requests).await;
    let (api_pool, feed_pool) = adapt_outcomes(state, outcomes);
    let events = pipeline::merge_pools(vec![api_pool, feed_pool]);
    info!(
        "collected {} events from {} sources (mode={})",
        events.len(),
        requests.len(),
        state.config.source_mode
    );

    CollectedEvents { events, teams }
}

/// Fetches every request concurrently and waits for all of them to settle.
pub async fn fetch_all(state: &AppState, requests: &[SourceRequest]) -> Vec<SourceOutcome> {
    let fetches = requests.iter().map(|request| async move {
        let label = request.label();
        match state.source.fetch_raw(request).await {
            Ok(payload) => {
                state.metrics.record_fetch();
                SourceOutcome::Fetched { label, payload }
            }
            Err(err) => {
                state.metrics.record_fetch_error();
                SourceOutcome::Failed {
                    label,
                    reason: format!("{:#}", err),
                }
            }
        }
    });
    join_all(fetches).await
}

/// Runs each payload through its adapter. Returns the API pool and the feed pool.
pub fn adapt_outcomes(state: &AppState, outcomes: Vec<SourceOutcome>) -> (Vec<Event>, Vec<Event>) {
    let api_adapter = ApiAdapter::new(&state.config.institution_name);
    let ics_adapter = IcsAdapter::new(
        TextClassifier::new(&state.config.summary_marker),
        &state.config.event_url_template,
    );

    let mut api_pool = Vec::new();
    let mut feed_pool = Vec::new();
    for outcome in outcomes {
        match outcome {
            SourceOutcome::Failed { label, reason } => {
                warn!("source {} failed: {}", label, reason);
            }
            SourceOutcome::Fetched {
                label,
                payload: RawPayload::Schedule { team, nodes },
            } => {
                let events = api_adapter.adapt_all(&nodes, &team);
                state
                    .metrics
                    .record_adapted(events.len(), nodes.len() - events.len());
                info!("{}: adapted {} of {} schedule rows", label, events.len(), nodes.len());
                api_pool.extend(events);
            }
            SourceOutcome::Fetched {
                label,
                payload: RawPayload::Feed(entries),
            } => {
                let events = ics_adapter.adapt_all(&entries);
                state
                    .metrics
                    .record_adapted(events.len(), entries.len() - events.len());
                info!("{}: adapted {} of {} feed entries", label, events.len(), entries.len());
                let missing = pipeline::missing_start_iso(&events);
                if !missing.is_empty() {
                    warn!("{}: {} feed events have no startISO", label, missing.len());
                }
                feed_pool.extend(events);
            }
        }
    }
    (api_pool, feed_pool)
}
