use bson::DateTime;
use serde::{Deserialize, Serialize};

use super::Island;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Referee {
    #[serde(rename = "_id")]
    pub id: String,
    pub license_number: String,
    pub name: String,
    pub surname: String,
    pub island: Island,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}
