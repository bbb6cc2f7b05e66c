// Schedule API records
// Shape of the team-schedule endpoint: [ { fullSchedule: { edges: [ { node } ] } } ]

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::value_objects::EventId;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEnvelope {
    #[serde(default)]
    pub full_schedule: Option<FullSchedule>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FullSchedule {
    #[serde(default, deserialize_with = "salvage_edges")]
    pub edges: Vec<ScheduleEdge>,
}

// One malformed row must not cost the team its whole schedule.
fn salvage_edges<'de, D>(deserializer: D) -> Result<Vec<ScheduleEdge>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, edge)| match serde_json::from_value::<ScheduleEdge>(edge) {
            Ok(edge) => Some(edge),
            Err(err) => {
                warn!(index, error = %err, "skipping malformed schedule row");
                None
            }
        })
        .collect())
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduleEdge {
    pub node: ScheduleNode,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleNode {
    pub event_id: EventId,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub event_time: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub home_or_away: Option<String>,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub facility: Option<FacilityRef>,
    #[serde(default)]
    pub results: Option<EventResults>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub is_scrimmage: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Participant {
    #[serde(default)]
    pub school: Option<School>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct School {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FacilityRef {
    #[serde(default)]
    pub facility: Option<Facility>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Facility {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResults {
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub is_cancelled: Option<bool>,
    #[serde(default)]
    pub is_postponed: Option<bool>,
}

/// Flattens the payload to its nodes. Only the first envelope carries a schedule.
pub fn schedule_nodes(envelopes: Vec<ScheduleEnvelope>) -> Vec<ScheduleNode> {
    envelopes
        .into_iter()
        .next()
        .and_then(|envelope| envelope.full_schedule)
        .map(|schedule| schedule.edges.into_iter().map(|edge| edge.node).collect())
        .unwrap_or_default()
}
