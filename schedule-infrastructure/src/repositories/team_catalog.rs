use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use tokio::fs;

use schedule_domain::{TeamCatalog, TeamRef};

pub struct JsonTeamCatalog {
    path: PathBuf,
}

impl JsonTeamCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TeamCatalog for JsonTeamCatalog {
    async fn list_teams(&self) -> anyhow::Result<Vec<TeamRef>> {
        let content = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("read {}", self.path.display()))?;
        let teams: Vec<TeamRef> = serde_json::from_str(&content)
            .with_context(|| format!("parse {}", self.path.display()))?;
        Ok(teams)
    }
}
