use bson::DateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{AgeCategory, BoutWinner, Island, WrestlerClassification};

/// Official record of a team meet: rosters, every bout and the signatures
/// that close it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchAct {
    #[serde(rename = "_id")]
    pub id: String,
    pub match_id: String,
    pub competition_id: String,
    pub season: String,
    pub category: AgeCategory,
    pub island: Island,
    pub venue: String,
    pub date: DateTime,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub main_referee: RefereeInfo,
    #[serde(default)]
    pub assistant_referees: Vec<RefereeInfo>,
    pub local_team: TeamRoster,
    pub visitor_team: TeamRoster,
    #[serde(default)]
    pub bouts: Vec<Bout>,
    pub local_score: u32,
    pub visitor_score: u32,
    pub winner: Option<BoutWinner>,
    pub comments: Option<String>,
    pub is_draft: bool,
    pub is_completed: bool,
    pub local_captain_signed: bool,
    pub visitor_captain_signed: bool,
    pub referee_signed: bool,
    pub signed_at: Option<DateTime>,
    pub created_by: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl MatchAct {
    pub fn is_fully_signed(&self) -> bool {
        self.local_captain_signed && self.visitor_captain_signed && self.referee_signed
    }

    pub fn has_signatures(&self) -> bool {
        self.local_captain_signed || self.visitor_captain_signed || self.referee_signed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefereeInfo {
    pub referee_id: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Referee name is required"))]
    pub name: String,
    #[validate(length(max = 50))]
    pub license_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamRoster {
    #[validate(length(min = 1, message = "Team id is required"))]
    pub team_id: String,
    #[validate(length(min = 1, max = 255))]
    pub team_name: String,
    pub captain_id: Option<String>,
    #[validate(length(max = 255))]
    pub coach_name: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub wrestlers: Vec<RosterEntry>,
}

impl TeamRoster {
    pub fn lists(&self, wrestler_id: &str) -> bool {
        self.wrestlers.iter().any(|w| w.wrestler_id == wrestler_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    #[validate(length(min = 1))]
    pub wrestler_id: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub license_number: Option<String>,
    pub classification: Option<WrestlerClassification>,
}

/// Single wrestler-vs-wrestler contest ("agarrada")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bout {
    #[serde(default)]
    pub id: String,
    #[validate(range(min = 1, max = 99))]
    pub order: u32,
    #[validate(length(min = 1))]
    pub local_wrestler_id: String,
    #[validate(length(min = 1))]
    pub visitor_wrestler_id: String,
    #[serde(default)]
    #[validate(range(max = 2))]
    pub local_falls: u8,
    #[serde(default)]
    #[validate(range(max = 2))]
    pub visitor_falls: u8,
    #[serde(default)]
    #[validate(range(max = 3))]
    pub local_penalties: u8,
    #[serde(default)]
    #[validate(range(max = 3))]
    pub visitor_penalties: u8,
    pub winner: Option<BoutWinner>,
}
