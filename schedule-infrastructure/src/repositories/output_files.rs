use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use schedule_domain::{Event, OutputConfig, ScheduleStore};

pub const COMBINED_FILE: &str = "combined.json";
pub const CANCELLED_TODAY_FILE: &str = "cancelled-today.json";

/// Pretty-printed JSON under `data_dir` and the calendar at `calendar_path`.
pub struct FileScheduleStore {
    data_dir: PathBuf,
    calendar_path: PathBuf,
}

impl FileScheduleStore {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            data_dir: PathBuf::from(&config.data_dir),
            calendar_path: PathBuf::from(&config.calendar_path),
        }
    }

    async fn write_events(&self, file_name: &str, events: &[Event]) -> anyhow::Result<()> {
        let path = self.data_dir.join(file_name);
        let content = serde_json::to_string_pretty(events)?;
        write_file(&path, content.as_bytes()).await
    }
}

async fn write_file(path: &Path, content: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    fs::write(path, content).await?;
    Ok(())
}

#[async_trait]
impl ScheduleStore for FileScheduleStore {
    async fn write_combined(&self, events: &[Event]) -> anyhow::Result<()> {
        self.write_events(COMBINED_FILE, events).await
    }

    async fn write_sport(&self, slug: &str, events: &[Event]) -> anyhow::Result<()> {
        self.write_events(&format!("{}.json", slug), events).await
    }

    async fn write_cancelled_today(&self, events: &[Event]) -> anyhow::Result<()> {
        self.write_events(CANCELLED_TODAY_FILE, events).await
    }

    async fn write_calendar(&self, document: &str) -> anyhow::Result<()> {
        write_file(&self.calendar_path, document.as_bytes()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schedule_domain::{EventId, EventTime, HomeOrAway};

    fn store(root: &Path) -> FileScheduleStore {
        FileScheduleStore::new(&OutputConfig {
            data_dir: root.join("dist/data").to_string_lossy().to_string(),
            calendar_path: root.join("dist/pshs-athletics.ics").to_string_lossy().to_string(),
        })
    }

    fn game() -> Event {
        Event {
            event_id: EventId(501),
            sport: "Boys Soccer".to_string(),
            date: Some("09/05/2025".to_string()),
            time: EventTime::Clock("7:00 PM".to_string()),
            title: "Canfield".to_string(),
            home_or_away: HomeOrAway::Away,
            location: None,
            opponent: Some("Canfield".to_string()),
            result: None,
            is_cancelled: false,
            is_postponed: false,
            url: "https://example.test/501".to_string(),
            start_iso: None,
            is_time_tba_tag: false,
        }
    }

    #[tokio::test]
    async fn writes_pretty_json_into_created_dirs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store(dir.path());
        store.write_combined(&[game()]).await.expect("combined");
        store.write_sport("boys-soccer", &[game()]).await.expect("sport");
        store.write_cancelled_today(&[]).await.expect("cancelled");

        let combined = std::fs::read_to_string(dir.path().join("dist/data/combined.json"))
            .expect("read combined");
        assert!(combined.starts_with("[\n  {\n    \"eventId\": 501,"));
        assert!(combined.contains("\"vsOrAt\": \"@\""));
        let parsed: Vec<Event> = serde_json::from_str(&combined).expect("round trip");
        assert_eq!(parsed, vec![game()]);

        assert!(dir.path().join("dist/data/boys-soccer.json").exists());
        let cancelled = std::fs::read_to_string(dir.path().join("dist/data/cancelled-today.json"))
            .expect("read cancelled");
        assert_eq!(cancelled, "[]");
    }

    #[tokio::test]
    async fn writes_calendar_document_verbatim() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store(dir.path());
        store
            .write_calendar("BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n")
            .await
            .expect("calendar");
        let written = std::fs::read_to_string(dir.path().join("dist/pshs-athletics.ics"))
            .expect("read calendar");
        assert_eq!(written, "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n");
    }
}
