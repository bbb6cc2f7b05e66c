use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use schedule_domain::{
    OutputConfig, RuntimeConfig, SourceMode, SourceSettings, DEFAULT_CALENDAR_NAME,
    DEFAULT_EVENT_URL_TEMPLATE, DEFAULT_INSTITUTION_NAME, DEFAULT_SUMMARY_MARKER,
    DEFAULT_UID_DOMAIN,
};

use crate::config::validation::{validate_http_url, validate_url_template};

pub const CONFIG_ENV: &str = "SCHEDULE_SYNC_CONFIG";
const MIN_REQUEST_TIMEOUT_SECONDS: u64 = 3;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub source_mode: SourceMode,
    pub feed_url: String,
    pub api_endpoint: String,
    pub api_origin: String,
    pub school_id: String,
    pub level_id: String,
    pub range_after: String,
    pub range_before: String,
    pub event_url_template: String,
    pub institution_name: String,
    pub summary_marker: String,
    pub calendar_name: String,
    pub uid_domain: String,
    pub teams_path: String,
    pub data_dir: String,
    pub calendar_path: String,
    pub request_timeout_seconds: u64,
    pub log_dir: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_mode: SourceMode::Ics,
            feed_url: "https://github.com/nruggieri-poland/athletics-ics-proxy/raw/refs/heads/master/schedule.ics"
                .to_string(),
            api_endpoint: "https://polandbulldogs.org/main/ajaxteamschedule".to_string(),
            api_origin: "https://polandbulldogs.org".to_string(),
            school_id: "OH4451495857".to_string(),
            level_id: "1".to_string(),
            range_after: "2025-07-01".to_string(),
            range_before: "2026-07-01".to_string(),
            event_url_template: DEFAULT_EVENT_URL_TEMPLATE.to_string(),
            institution_name: DEFAULT_INSTITUTION_NAME.to_string(),
            summary_marker: DEFAULT_SUMMARY_MARKER.to_string(),
            calendar_name: DEFAULT_CALENDAR_NAME.to_string(),
            uid_domain: DEFAULT_UID_DOMAIN.to_string(),
            teams_path: "./teams/teams.json".to_string(),
            data_dir: "./dist/data".to_string(),
            calendar_path: "./dist/pshs-athletics.ics".to_string(),
            request_timeout_seconds: 15,
            log_dir: None,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var(CONFIG_ENV).unwrap_or_else(|_| "./config.toml".to_string());
        Self::load_from(Path::new(&path)).await
    }

    pub async fn load_from(file_path: &Path) -> Result<Self> {
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            toml::from_str::<AppConfig>(&content)
                .map_err(|err| anyhow!("invalid {}: {}", file_path.display(), err))?
        } else {
            warn!("{} not found, using defaults", file_path.display());
            AppConfig::default()
        };
        config.apply_env_overrides()?;
        config.resolve_paths(file_path.parent());
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        if let Some(log_dir) = &self.log_dir {
            if log_dir.trim().is_empty() {
                self.log_dir = None;
            }
        }
        self.institution_name = self.institution_name.trim().to_string();
        self.summary_marker = self.summary_marker.trim().to_string();
        self.uid_domain = self.uid_domain.trim().to_string();
        self.request_timeout_seconds = self.request_timeout_seconds.max(MIN_REQUEST_TIMEOUT_SECONDS);
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.teams_path = resolve_path(base, &self.teams_path);
        self.data_dir = resolve_path(base, &self.data_dir);
        self.calendar_path = resolve_path(base, &self.calendar_path);
        if let Some(log_dir) = &self.log_dir {
            self.log_dir = Some(resolve_path(base, log_dir));
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_url_template(&self.event_url_template)?;
        if self.source_mode.uses_feed() {
            validate_http_url("feed_url", &self.feed_url)?;
        }
        if self.source_mode.uses_api() {
            validate_http_url("api_endpoint", &self.api_endpoint)?;
            validate_http_url("api_origin", &self.api_origin)?;
            if self.school_id.trim().is_empty() {
                return Err(anyhow!("school_id must not be empty in api mode"));
            }
            if self.teams_path.trim().is_empty() {
                return Err(anyhow!("teams_path must not be empty in api mode"));
            }
        }
        if self.summary_marker.is_empty() {
            return Err(anyhow!("summary_marker must not be empty"));
        }
        if self.uid_domain.is_empty() {
            return Err(anyhow!("uid_domain must not be empty"));
        }
        if self.data_dir.trim().is_empty() || self.calendar_path.trim().is_empty() {
            return Err(anyhow!("data_dir and calendar_path must not be empty"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            source_mode: self.source_mode,
            institution_name: self.institution_name.clone(),
            summary_marker: self.summary_marker.clone(),
            event_url_template: self.event_url_template.clone(),
            calendar_name: self.calendar_name.clone(),
            uid_domain: self.uid_domain.clone(),
        }
    }

    pub fn to_source_settings(&self) -> SourceSettings {
        SourceSettings {
            feed_url: self.feed_url.clone(),
            api_endpoint: self.api_endpoint.clone(),
            api_origin: self.api_origin.clone(),
            school_id: self.school_id.clone(),
            level_id: self.level_id.clone(),
            range_after: self.range_after.clone(),
            range_before: self.range_before.clone(),
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    pub fn to_output_config(&self) -> OutputConfig {
        OutputConfig {
            data_dir: self.data_dir.clone(),
            calendar_path: self.calendar_path.clone(),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(value) = env::var("SCHEDULE_SYNC_SOURCE_MODE") {
            self.source_mode = value.parse().map_err(|err: String| anyhow!(err))?;
        }
        if let Ok(value) = env::var("SCHEDULE_SYNC_FEED_URL") {
            self.feed_url = value;
        }
        if let Ok(value) = env::var("SCHEDULE_SYNC_API_ENDPOINT") {
            self.api_endpoint = value;
        }
        if let Ok(value) = env::var("SCHEDULE_SYNC_API_ORIGIN") {
            self.api_origin = value;
        }
        if let Ok(value) = env::var("SCHEDULE_SYNC_SCHOOL_ID") {
            self.school_id = value;
        }
        if let Ok(value) = env::var("SCHEDULE_SYNC_LEVEL_ID") {
            self.level_id = value;
        }
        if let Ok(value) = env::var("SCHEDULE_SYNC_RANGE_AFTER") {
            self.range_after = value;
        }
        if let Ok(value) = env::var("SCHEDULE_SYNC_RANGE_BEFORE") {
            self.range_before = value;
        }
        if let Ok(value) = env::var("SCHEDULE_SYNC_EVENT_URL_TEMPLATE") {
            self.event_url_template = value;
        }
        if let Ok(value) = env::var("SCHEDULE_SYNC_INSTITUTION_NAME") {
            self.institution_name = value;
        }
        if let Ok(value) = env::var("SCHEDULE_SYNC_SUMMARY_MARKER") {
            self.summary_marker = value;
        }
        if let Ok(value) = env::var("SCHEDULE_SYNC_CALENDAR_NAME") {
            self.calendar_name = value;
        }
        if let Ok(value) = env::var("SCHEDULE_SYNC_UID_DOMAIN") {
            self.uid_domain = value;
        }
        if let Ok(value) = env::var("SCHEDULE_SYNC_TEAMS_PATH") {
            self.teams_path = value;
        }
        if let Ok(value) = env::var("SCHEDULE_SYNC_DATA_DIR") {
            self.data_dir = value;
        }
        if let Ok(value) = env::var("SCHEDULE_SYNC_CALENDAR_PATH") {
            self.calendar_path = value;
        }
        if let Ok(value) = env::var("SCHEDULE_SYNC_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Ok(value) = env::var("SCHEDULE_SYNC_LOG_DIR") {
            self.log_dir = Some(value);
        }
        Ok(())
    }
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}
