use bson::DateTime;
use serde::{Deserialize, Serialize};

use super::{DivisionCategory, Island};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub island: Island,
    pub venue: String,
    pub division_category: DivisionCategory,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}
