// Calendar feed decoding
// VEVENTs of an RFC 5545 document to feed entries with absolute start instants

use std::io::BufReader;

use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use ical::parser::ical::component::IcalEvent;
use ical::property::Property;
use tracing::warn;

use schedule_domain::services::datetime_resolver::{local_midnight, localize};
use schedule_domain::FeedEntry;

pub fn parse_feed(content: &str) -> Result<Vec<FeedEntry>> {
    let reader = ical::IcalParser::new(BufReader::new(content.as_bytes()));
    let mut entries = Vec::new();
    for calendar in reader {
        let calendar = calendar.map_err(|err| anyhow!("ICS parse error: {}", err))?;
        entries.extend(calendar.events.iter().map(feed_entry));
    }
    Ok(entries)
}

fn feed_entry(event: &IcalEvent) -> FeedEntry {
    let mut entry = FeedEntry::default();
    for property in &event.properties {
        match property.name.as_str() {
            "UID" => entry.uid = text_value(property).unwrap_or_default(),
            "SUMMARY" => entry.summary = text_value(property).unwrap_or_default(),
            "LOCATION" => entry.location = text_value(property),
            "DTSTART" => {
                entry.start = start_instant(property);
                if entry.start.is_none() {
                    warn!(value = ?property.value, "unreadable DTSTART");
                }
            }
            _ => {}
        }
    }
    entry
}

fn text_value(property: &Property) -> Option<String> {
    property.value.as_deref().map(unescape_text)
}

/// Reverses RFC 5545 TEXT escaping (`\,` `\;` `\n` `\\`).
pub fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn param<'a>(property: &'a Property, name: &str) -> Option<&'a str> {
    property
        .params
        .as_ref()?
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .and_then(|(_, values)| values.first())
        .map(String::as_str)
}

/// UTC, `TZID=` local, floating and `VALUE=DATE` starts. Floating and date-only values use the fixed zone.
pub fn start_instant(property: &Property) -> Option<DateTime<Utc>> {
    let value = property.value.as_deref()?.trim();
    let date_only = param(property, "VALUE")
        .map(|kind| kind.eq_ignore_ascii_case("DATE"))
        .unwrap_or(false)
        || !value.contains('T');
    if date_only {
        let date = NaiveDate::parse_from_str(value, "%Y%m%d").ok()?;
        return local_midnight(date).map(|start| start.with_timezone(&Utc));
    }

    if let Some(utc) = value.strip_suffix('Z') {
        let naive = NaiveDateTime::parse_from_str(utc, "%Y%m%dT%H%M%S").ok()?;
        return Some(Utc.from_utc_datetime(&naive));
    }

    let naive = NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%S").ok()?;
    let local = match param(property, "TZID").map(|tzid| tzid.trim_matches('"').parse::<Tz>()) {
        Some(Ok(zone)) => zone.from_local_datetime(&naive).earliest(),
        Some(Err(_)) => {
            warn!(value, "unknown TZID; reading DTSTART in the fixed zone");
            localize(naive)
        }
        None => localize(naive),
    };
    local.map(|start| start.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//bigteams//schedule//EN\r\n\
BEGIN:VEVENT\r\n\
UID:4821.20250905@bigteams.com\r\n\
SUMMARY:Poland Seminary High School Football B Home Canfield\r\n\
LOCATION:Bulldog Stadium\\, Poland OH\r\n\
DTSTART:20250905T230000Z\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:4822\r\n\
SUMMARY:Poland Seminary High School Golf G Away Boardman\r\n\
DTSTART;TZID=America/Chicago:20250906T090000\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:4823\r\n\
SUMMARY:Poland Seminary High School Track C Away (Relays)\r\n\
DTSTART;VALUE=DATE:20260418\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:4824\r\n\
SUMMARY:Floating\r\n\
DTSTART:20251101T183000\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    fn instant(value: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(value)
            .expect("rfc3339")
            .with_timezone(&Utc)
    }

    #[test]
    fn decodes_every_start_form() {
        let entries = parse_feed(FEED).expect("parse");
        assert_eq!(entries.len(), 4);

        assert_eq!(entries[0].uid, "4821.20250905@bigteams.com");
        assert_eq!(entries[0].location.as_deref(), Some("Bulldog Stadium, Poland OH"));
        assert_eq!(entries[0].start, Some(instant("2025-09-05T23:00:00Z")));

        // 09:00 CDT
        assert_eq!(entries[1].start, Some(instant("2025-09-06T14:00:00Z")));
        assert!(entries[1].location.is_none());

        // local midnight EDT
        assert_eq!(entries[2].start, Some(instant("2026-04-18T04:00:00Z")));

        // floating times read as fixed-zone wall clock (EDT until Nov 2)
        assert_eq!(entries[3].start, Some(instant("2025-11-01T22:30:00Z")));
    }

    #[test]
    fn unescapes_text_values() {
        assert_eq!(unescape_text(r"Kiely Cup\; Day 1\, Field 2"), "Kiely Cup; Day 1, Field 2");
        assert_eq!(unescape_text(r"line\nbreak \\ done"), "line\nbreak \\ done");
    }

    #[test]
    fn unreadable_start_is_left_empty() {
        let feed = "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nUID:1\r\nSUMMARY:x\r\nDTSTART:soon\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
        let entries = parse_feed(feed).expect("parse");
        assert_eq!(entries.len(), 1);
        assert!(entries[0].start.is_none());
    }
}
