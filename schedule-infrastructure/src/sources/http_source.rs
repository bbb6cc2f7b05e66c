use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use schedule_domain::ports::{RawPayload, ScheduleSource, SourceRequest};
use schedule_domain::{schedule_nodes, FeedEntry, ScheduleEnvelope, ScheduleNode, SourceSettings, TeamRef};

use crate::sources::ics_feed::parse_feed;

const MIN_TIMEOUT_SECONDS: u64 = 3;

/// Team schedules come from the schedule API, the shared feed from a plain GET.
pub struct HttpScheduleSource {
    client: Client,
    settings: SourceSettings,
}

impl HttpScheduleSource {
    pub fn new(settings: SourceSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(
                settings.request_timeout_seconds.max(MIN_TIMEOUT_SECONDS),
            ))
            .build()?;
        Ok(Self { client, settings })
    }

    async fn fetch_team(&self, team: &TeamRef) -> Result<Vec<ScheduleNode>> {
        let response = self
            .client
            .post(&self.settings.api_endpoint)
            .header("accept", "*/*")
            .header("origin", &self.settings.api_origin)
            .header("referer", team_referer(&self.settings, team))
            .header("x-requested-with", "XMLHttpRequest")
            .form(&team_form(&self.settings, team))
            .send()
            .await?
            .error_for_status()?;
        let envelopes: Vec<ScheduleEnvelope> = response
            .json()
            .await
            .with_context(|| format!("decode schedule for {}", team.sport))?;
        let nodes = schedule_nodes(envelopes);
        info!("fetched {} schedule rows for {}", nodes.len(), team.sport);
        Ok(nodes)
    }

    async fn fetch_feed(&self) -> Result<Vec<FeedEntry>> {
        let body = self
            .client
            .get(&self.settings.feed_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let entries = parse_feed(&body)?;
        info!("fetched {} feed entries", entries.len());
        Ok(entries)
    }
}

#[async_trait]
impl ScheduleSource for HttpScheduleSource {
    async fn fetch_raw(&self, request: &SourceRequest) -> Result<RawPayload> {
        match request {
            SourceRequest::Team(team) => Ok(RawPayload::Schedule {
                team: team.clone(),
                nodes: self.fetch_team(team).await?,
            }),
            SourceRequest::Feed => Ok(RawPayload::Feed(self.fetch_feed().await?)),
        }
    }
}

pub fn team_form(settings: &SourceSettings, team: &TeamRef) -> Vec<(&'static str, String)> {
    vec![
        ("genderid", team.gender_id.clone()),
        ("levelid", settings.level_id.clone()),
        ("sportid", team.sport_id.clone()),
        ("offset", "0".to_string()),
        ("rangeafter", settings.range_after.clone()),
        ("rangebefore", settings.range_before.clone()),
        ("scid", settings.school_id.clone()),
        ("seasonid", team.season_id.clone()),
        ("id", team.id.clone()),
        ("scoretype", "1".to_string()),
        ("isfan", "false".to_string()),
    ]
}

fn team_referer(settings: &SourceSettings, team: &TeamRef) -> String {
    format!(
        "{}/main/teamschedule/id/{}/seasonid/{}",
        settings.api_origin.trim_end_matches('/'),
        team.id,
        team.season_id
    )
}
