use std::sync::Arc;

use anyhow::Result;

use schedule_application::{AppState, Metrics};
use schedule_infrastructure::{AppConfig, FileScheduleStore, HttpScheduleSource, JsonTeamCatalog};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let runtime_config = config.to_runtime_config();
        let source_settings = config.to_source_settings();
        let output_config = config.to_output_config();

        let state = AppState {
            config: runtime_config,
            source: Arc::new(HttpScheduleSource::new(source_settings)?),
            team_catalog: Arc::new(JsonTeamCatalog::new(&config.teams_path)),
            store: Arc::new(FileScheduleStore::new(&output_config)),
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state })
    }
}
