use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::common::{PaginationParams, validate_season};
use super::matches::MatchResponse;
use super::team::TeamResponse;
use crate::models::{AgeCategory, Competition, DivisionCategory, Island};

/// Request payload for creating a new competition
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompetitionRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    pub age_category: AgeCategory,

    pub division_category: DivisionCategory,

    pub island: Island,

    #[validate(custom(function = "validate_season"))]
    pub season: String,

    #[serde(default)]
    pub team_ids: Vec<String>,
}

/// Request payload for updating an existing competition
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompetitionRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    pub age_category: Option<AgeCategory>,

    pub division_category: Option<DivisionCategory>,

    pub island: Option<Island>,

    #[validate(custom(function = "validate_season"))]
    pub season: Option<String>,

    /// Replaces the participating teams
    pub team_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionResponse {
    pub id: String,
    pub name: String,
    pub age_category: AgeCategory,
    pub division_category: DivisionCategory,
    pub island: Island,
    pub season: String,
    pub team_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Competition with its teams and fixtures grouped by round
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionDetailResponse {
    #[serde(flatten)]
    pub competition: CompetitionResponse,
    pub teams: Vec<TeamResponse>,
    pub match_days: Vec<MatchDay>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchDay {
    pub round: u32,
    pub matches: Vec<MatchResponse>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CompetitionFilter {
    pub season: Option<String>,
    pub island: Option<Island>,
    pub division: Option<DivisionCategory>,
    pub age_category: Option<AgeCategory>,
    /// Competitions a team takes part in
    pub team_id: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl CompetitionFilter {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.size)
    }
}

impl From<Competition> for CompetitionResponse {
    fn from(comp: Competition) -> Self {
        Self {
            id: comp.id,
            name: comp.name,
            age_category: comp.age_category,
            division_category: comp.division_category,
            island: comp.island,
            season: comp.season,
            team_ids: comp.team_ids,
            created_at: comp.created_at.to_chrono(),
            updated_at: comp.updated_at.to_chrono(),
        }
    }
}

/// Group fixtures into match days, rounds ascending and fixtures by date
/// within a round
pub fn group_match_days(mut matches: Vec<MatchResponse>) -> Vec<MatchDay> {
    matches.sort_by(|a, b| a.round.cmp(&b.round).then(a.date.cmp(&b.date)));

    let mut days: Vec<MatchDay> = Vec::new();
    for m in matches {
        match days.last_mut() {
            Some(day) if day.round == m.round => day.matches.push(m),
            _ => days.push(MatchDay {
                round: m.round,
                matches: vec![m],
            }),
        }
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixture(id: &str, round: u32, day: u32) -> MatchResponse {
        let date = Utc.with_ymd_and_hms(2025, 3, day, 18, 0, 0).unwrap();
        MatchResponse {
            id: id.to_string(),
            competition_id: "c1".to_string(),
            round,
            local_team_id: "t1".to_string(),
            visitor_team_id: "t2".to_string(),
            local_score: 0,
            visitor_score: 0,
            date,
            venue: "Terrero".to_string(),
            completed: false,
            referee_id: None,
            match_act_id: None,
            created_at: date,
            updated_at: date,
        }
    }

    #[test]
    fn test_group_match_days_orders_rounds() {
        let days = group_match_days(vec![
            fixture("c", 2, 10),
            fixture("a", 1, 3),
            fixture("d", 2, 9),
            fixture("b", 1, 2),
        ]);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].round, 1);
        assert_eq!(
            days[0].matches.iter().map(|m| m.id.as_str()).collect::<Vec<_>>(),
            vec!["b", "a"]
        );
        assert_eq!(
            days[1].matches.iter().map(|m| m.id.as_str()).collect::<Vec<_>>(),
            vec!["d", "c"]
        );
    }

    #[test]
    fn test_create_rejects_bad_season() {
        let req = CreateCompetitionRequest {
            name: "Liga Regional".to_string(),
            age_category: AgeCategory::Senior,
            division_category: DivisionCategory::Regional,
            island: Island::GranCanaria,
            season: "2025".to_string(),
            team_ids: vec![],
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("season"));
    }
}
