use bson::DateTime;
use serde::{Deserialize, Serialize};

use super::{AgeCategory, DivisionCategory, Island};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competition {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub age_category: AgeCategory,
    pub division_category: DivisionCategory,
    pub island: Island,
    /// Sporting season, e.g. "2024-2025"
    pub season: String,
    #[serde(default)]
    pub team_ids: Vec<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}
