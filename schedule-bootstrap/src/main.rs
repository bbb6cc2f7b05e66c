use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing::error;

use schedule_domain::SourceMode;
use schedule_infrastructure::{parse_iso_date, AppConfig, CONFIG_ENV};

#[derive(Parser, Debug)]
#[command(name = "schedule-sync")]
#[command(about = "Normalize athletic schedules into JSON and an iCalendar feed", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    /// Source override: api, ics or both
    #[arg(short, long)]
    mode: Option<SourceMode>,

    /// Day used for the cancelled-today output (YYYY-MM-DD)
    #[arg(long)]
    today: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(config) = args.config {
        std::env::set_var(CONFIG_ENV, config);
    }

    let startup = schedule_bootstrap::init_startup_tracing();
    let mut config = AppConfig::load().await?;
    if let Some(mode) = args.mode {
        config.source_mode = mode;
        config.validate()?;
    }
    let today = args.today.as_deref().map(parse_iso_date).transpose()?;
    drop(startup);

    let _guard = schedule_bootstrap::init_tracing(config.log_dir.as_deref().map(Path::new));

    if let Err(err) = schedule_bootstrap::run_once(&config, today).await {
        error!("schedule sync failed: {:#}", err);
        return Err(err);
    }
    Ok(())
}
