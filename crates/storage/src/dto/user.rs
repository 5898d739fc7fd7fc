use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::common::{PaginationParams, double_option};
use crate::models::{Permission, User, UserRole};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub role: UserRole,
    pub associated_team_id: Option<String>,
    /// Role defaults merged with explicit grants
    pub permissions: Vec<Permission>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Administrative update of an account
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub surname: Option<String>,

    pub role: Option<UserRole>,

    /// `null` clears the association
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub associated_team_id: Option<Option<String>>,

    /// Replaces the explicit grants
    pub permissions: Option<Vec<Permission>>,

    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UserFilter {
    pub role: Option<UserRole>,
    /// Case-insensitive match on name, surname or email
    pub search: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl UserFilter {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page, self.size)
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let permissions = user.effective_permissions();
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            surname: user.surname,
            role: user.role,
            associated_team_id: user.associated_team_id,
            permissions,
            is_active: user.is_active,
            created_at: user.created_at.to_chrono(),
            updated_at: user.updated_at.to_chrono(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_association_absent_null_or_set() {
        let absent: UpdateUserRequest = serde_json::from_str(r#"{"name":"Pedro"}"#).unwrap();
        assert_eq!(absent.associated_team_id, None);

        let cleared: UpdateUserRequest =
            serde_json::from_str(r#"{"associatedTeamId":null}"#).unwrap();
        assert_eq!(cleared.associated_team_id, Some(None));

        let set: UpdateUserRequest = serde_json::from_str(r#"{"associatedTeamId":"t2"}"#).unwrap();
        assert_eq!(set.associated_team_id, Some(Some("t2".to_string())));
    }
}
