use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::common::PaginationParams;
use crate::models::Match;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub id: String,
    pub competition_id: String,
    pub round: u32,
    pub local_team_id: String,
    pub visitor_team_id: String,
    pub local_score: u32,
    pub visitor_score: u32,
    pub date: DateTime<Utc>,
    pub venue: String,
    pub completed: bool,
    pub referee_id: Option<String>,
    pub match_act_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchRequest {
    #[validate(length(min = 1, message = "Competition is required"))]
    pub competition_id: String,

    #[validate(range(min = 1, message = "Rounds start at 1"))]
    pub round: u32,

    #[validate(length(min = 1))]
    pub local_team_id: String,

    #[validate(length(min = 1))]
    pub visitor_team_id: String,

    pub date: DateTime<Utc>,

    #[validate(length(min = 1, max = 255, message = "Venue is required"))]
    pub venue: String,

    pub referee_id: Option<String>,
}

impl CreateMatchRequest {
    /// Checks that span several fields
    pub fn validate_teams(&self) -> Result<(), &'static str> {
        if self.local_team_id == self.visitor_team_id {
            return Err("A team cannot play against itself");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMatchRequest {
    #[validate(range(min = 1))]
    pub round: Option<u32>,

    #[validate(length(min = 1))]
    pub local_team_id: Option<String>,

    #[validate(length(min = 1))]
    pub visitor_team_id: Option<String>,

    pub date: Option<DateTime<Utc>>,

    #[validate(length(min = 1, max = 255))]
    pub venue: Option<String>,

    pub referee_id: Option<String>,
}

/// Final score of a fixture; recording it closes the match
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchResultRequest {
    #[validate(range(max = 99))]
    pub local_score: u32,

    #[validate(range(max = 99))]
    pub visitor_score: u32,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MatchFilter {
    pub competition_id: Option<String>,
    /// Fixtures where the team plays home or away
    pub team_id: Option<String>,
    pub round: Option<u32>,
    pub completed: Option<bool>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl MatchFilter {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.size)
    }
}

impl From<Match> for MatchResponse {
    fn from(m: Match) -> Self {
        Self {
            id: m.id,
            competition_id: m.competition_id,
            round: m.round,
            local_team_id: m.local_team_id,
            visitor_team_id: m.visitor_team_id,
            local_score: m.local_score,
            visitor_score: m.visitor_score,
            date: m.date.to_chrono(),
            venue: m.venue,
            completed: m.completed,
            referee_id: m.referee_id,
            match_act_id: m.match_act_id,
            created_at: m.created_at.to_chrono(),
            updated_at: m.updated_at.to_chrono(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_cannot_face_itself() {
        let req = CreateMatchRequest {
            competition_id: "c1".to_string(),
            round: 1,
            local_team_id: "t1".to_string(),
            visitor_team_id: "t1".to_string(),
            date: Utc::now(),
            venue: "Terrero".to_string(),
            referee_id: None,
        };
        assert!(req.validate().is_ok());
        assert!(req.validate_teams().is_err());
    }

    #[test]
    fn test_round_zero_is_rejected() {
        let req: CreateMatchRequest = serde_json::from_value(serde_json::json!({
            "competitionId": "c1",
            "round": 0,
            "localTeamId": "t1",
            "visitorTeamId": "t2",
            "date": "2025-03-01T18:00:00Z",
            "venue": "Terrero"
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }
}
