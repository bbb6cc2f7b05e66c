use std::sync::Arc;

use schedule_domain::ports::{ScheduleSource, ScheduleStore, TeamCatalog};
use schedule_domain::RuntimeConfig;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub source: Arc<dyn ScheduleSource>,
    pub team_catalog: Arc<dyn TeamCatalog>,
    pub store: Arc<dyn ScheduleStore>,
    pub metrics: Arc<Metrics>,
}
