use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::common::PaginationParams;
use crate::models::{DivisionCategory, Island, Team};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamResponse {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub island: Island,
    pub venue: String,
    pub division_category: DivisionCategory,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(url)]
    #[validate(length(max = 500))]
    pub image_url: Option<String>,

    pub island: Island,

    #[validate(length(min = 1, max = 255, message = "Venue is required"))]
    pub venue: String,

    pub division_category: DivisionCategory,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(url)]
    #[validate(length(max = 500))]
    pub image_url: Option<String>,

    pub island: Option<Island>,

    #[validate(length(min = 1, max = 255))]
    pub venue: Option<String>,

    pub division_category: Option<DivisionCategory>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TeamFilter {
    pub island: Option<Island>,
    pub division: Option<DivisionCategory>,
    /// Case-insensitive match on the team name
    pub search: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl TeamFilter {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.size)
    }
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        Self {
            id: team.id,
            name: team.name,
            image_url: team.image_url,
            island: team.island,
            venue: team.venue,
            division_category: team.division_category,
            is_active: team.is_active,
            created_at: team.created_at.to_chrono(),
            updated_at: team.updated_at.to_chrono(),
        }
    }
}
