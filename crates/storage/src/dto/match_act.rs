use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::common::{PaginationParams, validate_season};
use crate::models::{
    AgeCategory, Bout, BoutWinner, Island, MatchAct, RefereeInfo, SignatureParty, TeamRoster,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchActResponse {
    pub id: String,
    pub match_id: String,
    pub competition_id: String,
    pub season: String,
    pub category: AgeCategory,
    pub island: Island,
    pub venue: String,
    pub date: DateTime<Utc>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub main_referee: RefereeInfo,
    pub assistant_referees: Vec<RefereeInfo>,
    pub local_team: TeamRoster,
    pub visitor_team: TeamRoster,
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
    pub signed_at: Option<DateTime<Utc>>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Opens the act of a match. Competition, venue and date default to the
/// match's own values.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchActRequest {
    #[validate(length(min = 1, message = "Match is required"))]
    pub match_id: String,

    #[validate(custom(function = "validate_season"))]
    pub season: String,

    pub category: AgeCategory,

    pub island: Island,

    #[validate(length(min = 1, max = 255))]
    pub venue: Option<String>,

    pub date: Option<DateTime<Utc>>,

    #[validate(custom(function = "validate_clock_time"))]
    pub start_time: Option<String>,

    #[validate(custom(function = "validate_clock_time"))]
    pub end_time: Option<String>,

    #[validate(nested)]
    pub main_referee: RefereeInfo,

    #[serde(default)]
    #[validate(nested)]
    pub assistant_referees: Vec<RefereeInfo>,

    #[validate(nested)]
    pub local_team: TeamRoster,

    #[validate(nested)]
    pub visitor_team: TeamRoster,

    #[serde(default)]
    #[validate(nested)]
    pub bouts: Vec<Bout>,

    #[validate(length(max = 2000))]
    pub comments: Option<String>,
}

/// Edits an unsigned act, draft or completed; omitted fields keep their
/// stored value
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMatchActRequest {
    #[validate(length(min = 1, max = 255))]
    pub venue: Option<String>,

    pub date: Option<DateTime<Utc>>,

    #[validate(custom(function = "validate_clock_time"))]
    pub start_time: Option<String>,

    #[validate(custom(function = "validate_clock_time"))]
    pub end_time: Option<String>,

    #[validate(nested)]
    pub main_referee: Option<RefereeInfo>,

    #[validate(nested)]
    pub assistant_referees: Option<Vec<RefereeInfo>>,

    #[validate(nested)]
    pub local_team: Option<TeamRoster>,

    #[validate(nested)]
    pub visitor_team: Option<TeamRoster>,

    #[validate(nested)]
    pub bouts: Option<Vec<Bout>>,

    #[validate(length(max = 2000))]
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignMatchActRequest {
    pub party: SignatureParty,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MatchActFilter {
    pub match_id: Option<String>,
    pub competition_id: Option<String>,
    pub is_draft: Option<bool>,
    pub is_completed: Option<bool>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl MatchActFilter {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.size)
    }
}

/// 24h "HH:MM"
fn validate_clock_time(time: &str) -> Result<(), validator::ValidationError> {
    let valid = time
        .split_once(':')
        .filter(|(h, m)| h.len() == 2 && m.len() == 2)
        .and_then(|(h, m)| Some((h.parse::<u8>().ok()?, m.parse::<u8>().ok()?)))
        .is_some_and(|(h, m)| h < 24 && m < 60);

    if valid {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_time"))
    }
}

impl From<MatchAct> for MatchActResponse {
    fn from(act: MatchAct) -> Self {
        Self {
            id: act.id,
            match_id: act.match_id,
            competition_id: act.competition_id,
            season: act.season,
            category: act.category,
            island: act.island,
            venue: act.venue,
            date: act.date.to_chrono(),
            start_time: act.start_time,
            end_time: act.end_time,
            main_referee: act.main_referee,
            assistant_referees: act.assistant_referees,
            local_team: act.local_team,
            visitor_team: act.visitor_team,
            bouts: act.bouts,
            local_score: act.local_score,
            visitor_score: act.visitor_score,
            winner: act.winner,
            comments: act.comments,
            is_draft: act.is_draft,
            is_completed: act.is_completed,
            local_captain_signed: act.local_captain_signed,
            visitor_captain_signed: act.visitor_captain_signed,
            referee_signed: act.referee_signed,
            signed_at: act.signed_at.map(|d| d.to_chrono()),
            created_by: act.created_by,
            created_at: act.created_at.to_chrono(),
            updated_at: act.updated_at.to_chrono(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateMatchActRequest {
        serde_json::from_value(serde_json::json!({
            "matchId": "m1",
            "season": "2024-2025",
            "category": "SENIOR",
            "island": "LANZAROTE",
            "startTime": "18:30",
            "mainReferee": { "name": "Antonio Perdomo" },
            "localTeam": { "teamId": "t1", "teamName": "C.L. Tao" },
            "visitorTeam": { "teamId": "t2", "teamName": "C.L. Unión Sur Yaiza" },
            "bouts": [
                {
                    "order": 1,
                    "localWrestlerId": "w1",
                    "visitorWrestlerId": "w2",
                    "localFalls": 2,
                    "visitorFalls": 1
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_request() {
        let req = request();
        assert!(req.validate().is_ok());
        assert_eq!(req.bouts[0].local_penalties, 0);
        assert!(req.bouts[0].id.is_empty());
    }

    #[test]
    fn test_rejects_bad_clock_time() {
        let mut req = request();
        req.start_time = Some("25:00".to_string());
        assert!(req.validate().is_err());

        req.start_time = Some("9:15".to_string());
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_nested_bout_limits_are_checked() {
        let mut req = request();
        req.bouts[0].local_falls = 3;
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_nested_referee_name_is_required() {
        let mut req = request();
        req.main_referee.name.clear();
        assert!(req.validate().is_err());
    }
}
