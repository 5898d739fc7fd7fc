use bson::DateTime;
use serde::{Deserialize, Serialize};

/// A fixture between two teams on a given round of a competition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    #[serde(rename = "_id")]
    pub id: String,
    pub competition_id: String,
    pub round: u32,
    pub local_team_id: String,
    pub visitor_team_id: String,
    pub local_score: u32,
    pub visitor_score: u32,
    pub date: DateTime,
    pub venue: String,
    pub completed: bool,
    pub referee_id: Option<String>,
    pub match_act_id: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}
