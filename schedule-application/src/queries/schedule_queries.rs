use chrono::{NaiveDate, Utc};

use schedule_domain::services::datetime_resolver::{parse_date, FIXED_ZONE};
use schedule_domain::{sport_slug, Event, TeamRef};

/// One per-sport output file: slug plus the events of that sport.
#[derive(Debug, Clone, PartialEq)]
pub struct SportSlice {
    pub sport_title: String,
    pub slug: String,
    pub events: Vec<Event>,
}

pub fn today_in_fixed_zone() -> NaiveDate {
    Utc::now().with_timezone(&FIXED_ZONE).date_naive()
}

/// Distinct sport titles of the catalog, first occurrence first.
pub fn sport_titles(teams: &[TeamRef]) -> Vec<String> {
    let mut titles: Vec<String> = Vec::new();
    for team in teams {
        if !titles.iter().any(|title| title == &team.sport_title) {
            titles.push(team.sport_title.clone());
        }
    }
    titles
}

pub fn events_for_sport(events: &[Event], sport_title: &str) -> Vec<Event> {
    events
        .iter()
        .filter(|event| event.sport == sport_title)
        .cloned()
        .collect()
}

pub fn sport_slices(events: &[Event], teams: &[TeamRef]) -> Vec<SportSlice> {
    sport_titles(teams)
        .into_iter()
        .map(|sport_title| SportSlice {
            slug: sport_slug(&sport_title),
            events: events_for_sport(events, &sport_title),
            sport_title,
        })
        .collect()
}

/// Cancelled or postponed events dated `day`.
pub fn cancelled_on(events: &[Event], day: NaiveDate) -> Vec<Event> {
    events
        .iter()
        .filter(|event| event.is_cancelled || event.is_postponed)
        .filter(|event| event.date.as_deref().and_then(parse_date) == Some(day))
        .cloned()
        .collect()
}
