// Event pipeline
// Filters, deduplicates and orders adapted events

use std::collections::HashSet;

use chrono::DateTime;
use chrono_tz::Tz;

use crate::entities::Event;
use crate::services::datetime_resolver::{self, FIXED_ZONE};

/// Sort key for events whose start cannot be resolved.
pub const UNRESOLVED_SORT_KEY: i64 = i64::MAX;

/// Drops cancelled, postponed and dateless events, then sorts by start.
/// The sort is stable; unresolvable events trail in their input order.
pub fn process(events: Vec<Event>) -> Vec<Event> {
    let mut kept: Vec<Event> = events
        .into_iter()
        .filter(Event::is_schedulable)
        .collect();
    kept.sort_by_cached_key(sort_key);
    kept
}

/// `startISO` is authoritative; otherwise the event's date and time go through the resolver.
pub fn resolved_start(event: &Event) -> Option<DateTime<Tz>> {
    if let Some(iso) = event.start_iso.as_deref() {
        return DateTime::parse_from_rfc3339(iso.trim())
            .ok()
            .map(|instant| instant.with_timezone(&FIXED_ZONE));
    }
    let date = event.date.as_deref()?;
    datetime_resolver::resolve(date, event.time.as_clock())
        .ok()
        .map(|resolved| resolved.start)
}

fn sort_key(event: &Event) -> i64 {
    resolved_start(event)
        .map(|start| start.timestamp_millis())
        .unwrap_or(UNRESOLVED_SORT_KEY)
}

/// Keeps the first occurrence of each event id.
pub fn dedupe_by_event_id(events: Vec<Event>) -> Vec<Event> {
    let mut seen = HashSet::new();
    events
        .into_iter()
        .filter(|event| seen.insert(event.event_id))
        .collect()
}

/// Dedupes every pool on its own and concatenates them. Ids are only unique per source.
pub fn merge_pools(pools: Vec<Vec<Event>>) -> Vec<Event> {
    pools.into_iter().flat_map(dedupe_by_event_id).collect()
}

pub fn missing_start_iso(events: &[Event]) -> Vec<&Event> {
    events
        .iter()
        .filter(|event| event.start_iso.is_none())
        .collect()
}
