use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::common::{PaginationParams, validate_license};
use crate::models::{AgeCategory, Wrestler, WrestlerClassification};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WrestlerResponse {
    pub id: String,
    pub license_number: String,
    pub name: String,
    pub surname: String,
    pub team_id: String,
    pub category: AgeCategory,
    pub classification: WrestlerClassification,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub birth_date: Option<NaiveDate>,
    pub nickname: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWrestlerRequest {
    #[validate(length(min = 1, max = 50))]
    #[validate(custom(function = "validate_license"))]
    pub license_number: String,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: String,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Surname must be between 1 and 100 characters"
    ))]
    pub surname: String,

    #[validate(length(min = 1, message = "Team is required"))]
    pub team_id: String,

    pub category: AgeCategory,

    pub classification: WrestlerClassification,

    #[validate(range(min = 50.0, max = 250.0, message = "Height is in centimetres"))]
    pub height: Option<f64>,

    #[validate(range(min = 20.0, max = 300.0, message = "Weight is in kilograms"))]
    pub weight: Option<f64>,

    pub birth_date: Option<NaiveDate>,

    #[validate(length(max = 100))]
    pub nickname: Option<String>,

    #[validate(url)]
    #[validate(length(max = 500))]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWrestlerRequest {
    #[validate(length(min = 1, max = 50))]
    #[validate(custom(function = "validate_license"))]
    pub license_number: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub surname: Option<String>,

    #[validate(length(min = 1))]
    pub team_id: Option<String>,

    pub category: Option<AgeCategory>,

    pub classification: Option<WrestlerClassification>,

    #[validate(range(min = 50.0, max = 250.0))]
    pub height: Option<f64>,

    #[validate(range(min = 20.0, max = 300.0))]
    pub weight: Option<f64>,

    pub birth_date: Option<NaiveDate>,

    #[validate(length(max = 100))]
    pub nickname: Option<String>,

    #[validate(url)]
    #[validate(length(max = 500))]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct WrestlerFilter {
    pub team_id: Option<String>,
    pub category: Option<AgeCategory>,
    pub classification: Option<WrestlerClassification>,
    /// Case-insensitive match on name, surname, nickname or license
    pub search: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl WrestlerFilter {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.size)
    }
}

impl From<Wrestler> for WrestlerResponse {
    fn from(wrestler: Wrestler) -> Self {
        Self {
            id: wrestler.id,
            license_number: wrestler.license_number,
            name: wrestler.name,
            surname: wrestler.surname,
            team_id: wrestler.team_id,
            category: wrestler.category,
            classification: wrestler.classification,
            height: wrestler.height,
            weight: wrestler.weight,
            birth_date: wrestler.birth_date,
            nickname: wrestler.nickname,
            image_url: wrestler.image_url,
            is_active: wrestler.is_active,
            created_at: wrestler.created_at.to_chrono(),
            updated_at: wrestler.updated_at.to_chrono(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateWrestlerRequest {
        CreateWrestlerRequest {
            license_number: "GC-1024".to_string(),
            name: "Francisco".to_string(),
            surname: "Rodríguez".to_string(),
            team_id: "team-1".to_string(),
            category: AgeCategory::Senior,
            classification: WrestlerClassification::PuntalB,
            height: Some(182.0),
            weight: Some(115.5),
            birth_date: NaiveDate::from_ymd_opt(1995, 4, 12),
            nickname: Some("Pancho".to_string()),
            image_url: None,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_rejects_lowercase_license() {
        let mut req = request();
        req.license_number = "gc-1024".to_string();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("license_number"));
    }

    #[test]
    fn test_rejects_height_in_metres() {
        let mut req = request();
        req.height = Some(1.82);
        assert!(req.validate().is_err());
    }
}
