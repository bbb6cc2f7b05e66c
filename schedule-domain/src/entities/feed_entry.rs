// Feed entry entity
// One VEVENT of the upstream calendar feed, already decoded

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub uid: String,
    pub summary: String,
    pub start: Option<DateTime<Utc>>,
    pub location: Option<String>,
}
