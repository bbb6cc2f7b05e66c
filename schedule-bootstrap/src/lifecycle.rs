use anyhow::Result;
use chrono::NaiveDate;
use tracing::info;

use schedule_application::commands::{collect_events, publish_schedule, PublishReport};
use schedule_application::queries::today_in_fixed_zone;
use schedule_infrastructure::AppConfig;

use crate::context::AppContext;

/// One full sync: fetch every source, normalize, write all outputs.
pub async fn run_once(config: &AppConfig, today: Option<NaiveDate>) -> Result<PublishReport> {
    let context = AppContext::new(config)?;
    let state = context.state;
    let today = today.unwrap_or_else(today_in_fixed_zone);
    info!(
        "starting schedule sync (mode={}, today={})",
        state.config.source_mode, today
    );

    let collected = collect_events(&state).await;
    let report = publish_schedule(&state, collected, today).await?;

    info!("{}", state.metrics.summary_line());
    Ok(report)
}
