use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::user::UserResponse;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,

    /// Plain text or the client-side SHA-256 digest (hex)
    #[validate(length(min = 1, max = 128, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email(message = "A valid email is required"))]
    #[validate(length(max = 255))]
    pub email: String,

    #[validate(length(
        min = 8,
        max = 128,
        message = "Password must be between 8 and 128 characters"
    ))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, max = 100, message = "Surname is required"))]
    pub surname: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_requires_valid_email() {
        let req = LoginRequest {
            email: "not-an-email".to_string(),
            password: "secret".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_enforces_password_length() {
        let req = RegisterRequest {
            email: "luchador@example.com".to_string(),
            password: "short".to_string(),
            name: "Pedro".to_string(),
            surname: "Díaz".to_string(),
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }
}
