use async_trait::async_trait;

use crate::entities::{FeedEntry, ScheduleNode, TeamRef};

/// One upstream fetch: a team's schedule page or the shared calendar feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRequest {
    Team(TeamRef),
    Feed,
}

impl SourceRequest {
    pub fn label(&self) -> String {
        match self {
            SourceRequest::Team(team) => format!("team:{}", team.sport),
            SourceRequest::Feed => "feed".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum RawPayload {
    Schedule {
        team: TeamRef,
        nodes: Vec<ScheduleNode>,
    },
    Feed(Vec<FeedEntry>),
}

#[async_trait]
pub trait ScheduleSource: Send + Sync {
    async fn fetch_raw(&self, request: &SourceRequest) -> anyhow::Result<RawPayload>;
}

#[async_trait]
pub trait TeamCatalog: Send + Sync {
    async fn list_teams(&self) -> anyhow::Result<Vec<TeamRef>>;
}
