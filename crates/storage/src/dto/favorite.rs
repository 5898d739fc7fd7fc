use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::{Favorite, FavoriteType};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddFavoriteRequest {
    #[validate(length(min = 1, max = 64, message = "Entity id is required"))]
    pub entity_id: String,

    pub entity_type: FavoriteType,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    pub id: String,
    pub user_id: String,
    pub entity_id: String,
    pub entity_type: FavoriteType,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteStatusResponse {
    pub is_favorite: bool,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FavoriteFilter {
    pub entity_type: Option<FavoriteType>,
}

impl From<Favorite> for FavoriteResponse {
    fn from(favorite: Favorite) -> Self {
        Self {
            id: favorite.id,
            user_id: favorite.user_id,
            entity_id: favorite.entity_id,
            entity_type: favorite.entity_type,
            created_at: favorite.created_at.to_chrono(),
        }
    }
}
