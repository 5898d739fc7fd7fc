use bson::DateTime;
use serde::{Deserialize, Serialize};

use super::FavoriteType;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub entity_id: String,
    pub entity_type: FavoriteType,
    pub created_at: DateTime,
}
