use chrono::NaiveDate;
use tracing::{info, warn};

use crate::commands::CollectedEvents;
use crate::queries::{cancelled_on, sport_slices};
use crate::{AppError, AppState};
use schedule_domain::services::pipeline;
use schedule_domain::CalendarEmitter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    pub published: usize,
    pub sport_files: usize,
    pub cancelled_today: usize,
    pub calendar_bytes: usize,
}

/// Runs the pipeline over collected events and writes every output.
/// Only sink failures abort; there is nothing left to salvage at that point.
pub async fn publish_schedule(
    state: &AppState,
    collected: CollectedEvents,
    today: NaiveDate,
) -> Result<PublishReport, AppError> {
    let CollectedEvents { events, teams } = collected;

    // Selected before the pipeline drops cancelled and postponed events.
    let cancelled_today = cancelled_on(&events, today);
    let events = pipeline::process(events);

    state.store.write_combined(&events).await?;
    info!("wrote {} events to combined output", events.len());

    let mut sport_files = 0;
    if teams.is_empty() {
        warn!("team catalog unavailable; skipping per-sport outputs");
    } else {
        for slice in sport_slices(&events, &teams) {
            state.store.write_sport(&slice.slug, &slice.events).await?;
            info!("wrote {} events to {}.json", slice.events.len(), slice.slug);
            sport_files += 1;
        }
    }

    state.store.write_cancelled_today(&cancelled_today).await?;
    info!(
        "wrote {} cancelled/postponed games for {}",
        cancelled_today.len(),
        today
    );

    let emitter = CalendarEmitter::new(&state.config.calendar_name, &state.config.uid_domain);
    let document = emitter.emit(&events);
    state.store.write_calendar(&document).await?;
    info!("calendar written ({} bytes)", document.len());

    state.metrics.record_published(events.len());
    Ok(PublishReport {
        published: events.len(),
        sport_files,
        cancelled_today: cancelled_today.len(),
        calendar_bytes: document.len(),
    })
}
