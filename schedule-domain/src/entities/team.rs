// Team entity
// One row of the team catalog; drives the per-team API fetch

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRef {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub sport: String,
    pub sport_title: String,
    #[serde(rename = "genderid", default, deserialize_with = "string_or_number")]
    pub gender_id: String,
    #[serde(rename = "sportid", default, deserialize_with = "string_or_number")]
    pub sport_id: String,
    #[serde(rename = "seasonid", default, deserialize_with = "string_or_number")]
    pub season_id: String,
}

// Catalog files written by hand mix quoted and bare ids.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Number(i64),
    }

    Ok(match Repr::deserialize(deserializer)? {
        Repr::Text(text) => text.trim().to_string(),
        Repr::Number(value) => value.to_string(),
    })
}
