use bson::DateTime;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{AgeCategory, WrestlerClassification};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wrestler {
    #[serde(rename = "_id")]
    pub id: String,
    pub license_number: String,
    pub name: String,
    pub surname: String,
    pub team_id: String,
    pub category: AgeCategory,
    pub classification: WrestlerClassification,
    /// Centimetres
    pub height: Option<f64>,
    /// Kilograms
    pub weight: Option<f64>,
    pub birth_date: Option<NaiveDate>,
    pub nickname: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}
