use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::common::{PaginationParams, validate_license};
use crate::models::{Island, Referee};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefereeResponse {
    pub id: String,
    pub license_number: String,
    pub name: String,
    pub surname: String,
    pub island: Island,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRefereeRequest {
    #[validate(length(min = 1, max = 50))]
    #[validate(custom(function = "validate_license"))]
    pub license_number: String,

    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 100))]
    pub surname: String,

    pub island: Island,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 6, max = 20))]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRefereeRequest {
    #[validate(length(min = 1, max = 50))]
    #[validate(custom(function = "validate_license"))]
    pub license_number: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub surname: Option<String>,

    pub island: Option<Island>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 6, max = 20))]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RefereeFilter {
    pub island: Option<Island>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl RefereeFilter {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.size)
    }
}

impl From<Referee> for RefereeResponse {
    fn from(referee: Referee) -> Self {
        Self {
            id: referee.id,
            license_number: referee.license_number,
            name: referee.name,
            surname: referee.surname,
            island: referee.island,
            email: referee.email,
            phone: referee.phone,
            is_active: referee.is_active,
            created_at: referee.created_at.to_chrono(),
            updated_at: referee.updated_at.to_chrono(),
        }
    }
}
