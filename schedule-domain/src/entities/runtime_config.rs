// Runtime configuration entities
// Projections of the loaded config handed to each layer

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    Api,
    Ics,
    Both,
}

impl SourceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceMode::Api => "api",
            SourceMode::Ics => "ics",
            SourceMode::Both => "both",
        }
    }

    pub fn uses_api(&self) -> bool {
        matches!(self, SourceMode::Api | SourceMode::Both)
    }

    pub fn uses_feed(&self) -> bool {
        matches!(self, SourceMode::Ics | SourceMode::Both)
    }
}

impl std::str::FromStr for SourceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "api" => Ok(SourceMode::Api),
            "ics" | "feed" => Ok(SourceMode::Ics),
            "both" => Ok(SourceMode::Both),
            other => Err(format!("unknown source mode '{}'", other)),
        }
    }
}

impl fmt::Display for SourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub source_mode: SourceMode,
    pub institution_name: String,
    pub summary_marker: String,
    pub event_url_template: String,
    pub calendar_name: String,
    pub uid_domain: String,
}

#[derive(Debug, Clone)]
pub struct SourceSettings {
    pub feed_url: String,
    pub api_endpoint: String,
    pub api_origin: String,
    pub school_id: String,
    pub level_id: String,
    pub range_after: String,
    pub range_before: String,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub data_dir: String,
    pub calendar_path: String,
}
