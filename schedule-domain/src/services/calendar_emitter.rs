// Calendar document emitter
// Renders schedulable events as an RFC 5545 calendar pinned to the fixed zone

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use icalendar::{
    Calendar, CalendarDateTime, Component, Event as CalendarEvent, EventLike, Property,
};
use tracing::warn;

use crate::entities::Event;
use crate::services::datetime_resolver::{
    self, ResolveError, EVENT_DURATION_HOURS, FIXED_ZONE, FIXED_ZONE_ID,
};

pub const DEFAULT_CALENDAR_NAME: &str = "PSHS Athletics Events";
pub const DEFAULT_UID_DOMAIN: &str = "polandbulldogs.org";

// Current US Eastern rules, referenced by every TZID on timed entries.
// The builder stamps UID and DTSTAMP onto any component it renders, so this block is spliced in as text.
const FIXED_ZONE_DEFINITION: [&str; 19] = [
    "BEGIN:VTIMEZONE",
    "TZID:America/New_York",
    "X-LIC-LOCATION:America/New_York",
    "BEGIN:DAYLIGHT",
    "TZOFFSETFROM:-0500",
    "TZOFFSETTO:-0400",
    "TZNAME:EDT",
    "DTSTART:19700308T020000",
    "RRULE:FREQ=YEARLY;BYMONTH=3;BYDAY=2SU",
    "END:DAYLIGHT",
    "BEGIN:STANDARD",
    "TZOFFSETFROM:-0400",
    "TZOFFSETTO:-0500",
    "TZNAME:EST",
    "DTSTART:19701101T020000",
    "RRULE:FREQ=YEARLY;BYMONTH=11;BYDAY=1SU",
    "END:STANDARD",
    "END:VTIMEZONE",
    "",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySchedule {
    AllDay(NaiveDate),
    Timed {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

/// Everything needed to write one VEVENT, computed without touching the calendar builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEntry {
    pub uid: String,
    pub stamp: DateTime<Utc>,
    pub schedule: EntrySchedule,
    pub summary: String,
    pub description: String,
    pub location: String,
    pub url: String,
}

impl CalendarEntry {
    fn to_component(&self) -> CalendarEvent {
        let mut component = CalendarEvent::new();
        component
            .uid(&self.uid)
            .timestamp(self.stamp)
            .summary(&self.summary)
            .description(&self.description)
            .location(&self.location)
            .add_property("URL", &self.url);

        match &self.schedule {
            EntrySchedule::AllDay(date) => {
                component.starts(*date);
            }
            EntrySchedule::Timed { start, end } => {
                component.starts(in_fixed_zone(*start)).ends(in_fixed_zone(*end));
            }
        }
        component.done()
    }
}

fn in_fixed_zone(date_time: NaiveDateTime) -> CalendarDateTime {
    CalendarDateTime::WithTimezone {
        date_time,
        tzid: FIXED_ZONE_ID.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct CalendarEmitter {
    calendar_name: String,
    uid_domain: String,
}

impl Default for CalendarEmitter {
    fn default() -> Self {
        Self::new(DEFAULT_CALENDAR_NAME, DEFAULT_UID_DOMAIN)
    }
}

impl CalendarEmitter {
    pub fn new(calendar_name: &str, uid_domain: &str) -> Self {
        Self {
            calendar_name: calendar_name.to_string(),
            uid_domain: uid_domain.to_string(),
        }
    }

    pub fn emit(&self, events: &[Event]) -> String {
        let mut calendar = Calendar::new();
        calendar
            .name(&self.calendar_name)
            .append_property(Property::new("X-WR-TIMEZONE", FIXED_ZONE_ID));
        for entry in events.iter().filter_map(|event| self.entry_for(event)) {
            calendar.push(entry.to_component());
        }
        with_zone_definition(calendar.done().to_string())
    }

    /// `None` when the event is not schedulable or its start does not resolve.
    pub fn entry_for(&self, event: &Event) -> Option<CalendarEntry> {
        if !event.is_schedulable() {
            return None;
        }

        let (start, schedule) = match schedule_of(event) {
            Ok(planned) => planned,
            Err(err) => {
                warn!(
                    date = event.date.as_deref().unwrap_or_default(),
                    time = %event.time,
                    title = %event.title,
                    error = %err,
                    "skipping calendar entry with invalid date/time"
                );
                return None;
            }
        };

        let summary = format!(
            "{}: {} {} {}",
            event.sport,
            event.home_or_away,
            event.vs_or_at(),
            event.opponent_or_default()
        )
        .trim_end()
        .to_string();

        Some(CalendarEntry {
            uid: format!("{}@{}", event.event_id, self.uid_domain),
            stamp: start.with_timezone(&Utc),
            schedule,
            summary,
            description: format!("{}\n\nMore info: {}", event.title, event.url),
            location: format!("{} - {}", event.home_or_away, event.location_or_opponent()),
            url: event.url.clone(),
        })
    }
}

// Calendar properties render before any component, so the zone goes ahead of the first one.
fn with_zone_definition(mut document: String) -> String {
    let at = document
        .find("BEGIN:VEVENT")
        .or_else(|| document.find("END:VCALENDAR"))
        .unwrap_or(document.len());
    document.insert_str(at, &FIXED_ZONE_DEFINITION.join("\r\n"));
    document
}

fn schedule_of(event: &Event) -> Result<(DateTime<Tz>, EntrySchedule), ResolveError> {
    let date = event.date.as_deref().unwrap_or_default();
    let invalid = || ResolveError::UnparseableDateTime {
        date: date.to_string(),
        time: event.time.to_string(),
    };

    let from_iso = match event.start_iso.as_deref() {
        Some(iso) => Some(
            DateTime::parse_from_rfc3339(iso.trim())
                .map_err(|_| invalid())?
                .with_timezone(&FIXED_ZONE),
        ),
        None => None,
    };

    if event.is_all_day() {
        let start = match from_iso {
            Some(start) => start,
            None => datetime_resolver::resolve(date, None)?.start,
        };
        return Ok((start, EntrySchedule::AllDay(start.date_naive())));
    }

    let start = match from_iso {
        Some(start) => start,
        None => datetime_resolver::resolve(date, event.time.as_clock())?.start,
    };
    let end = start + Duration::hours(EVENT_DURATION_HOURS);
    Ok((
        start,
        EntrySchedule::Timed {
            start: start.naive_local(),
            end: end.naive_local(),
        },
    ))
}
