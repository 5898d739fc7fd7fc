use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use storage::models::{Permission, User, UserRole};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub email: String,
    pub role: UserRole,
    /// Effective permissions at the time the token was issued
    pub permissions: Vec<Permission>,
    #[serde(rename = "teamId", default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    /// Wrestler writes limited to the associated team
    #[serde(rename = "ownTeamOnly", default)]
    pub own_team_only: bool,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies HS256 access tokens
#[derive(Clone)]
pub struct JwtService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    lifetime: Duration,
}

impl JwtService {
    pub fn new(secret: &str, issuer: &str, audience: &str, lifetime_hours: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            issuer: issuer.to_string(),
            audience: audience.to_string(),
            lifetime: Duration::hours(lifetime_hours),
        }
    }

    /// Seconds a freshly issued token stays valid
    pub fn expires_in(&self) -> i64 {
        self.lifetime.num_seconds()
    }

    pub fn issue(&self, user: &User) -> jsonwebtoken::errors::Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            permissions: user.effective_permissions(),
            team_id: user.associated_team_id.clone(),
            own_team_only: user.wrestler_writes_own_team_only(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    pub fn verify(&self, token: &str) -> jsonwebtoken::errors::Result<Claims> {
        decode::<Claims>(token, &self.decoding, &self.validation).map(|data| data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::DateTime;

    fn coach() -> User {
        User {
            id: "u1".to_string(),
            email: "coach@example.com".to_string(),
            name: "Pedro".to_string(),
            surname: "Hernández".to_string(),
            role: UserRole::Coach,
            associated_team_id: Some("t1".to_string()),
            permissions: vec![],
            password_hash: String::new(),
            is_active: true,
            created_at: DateTime::now(),
            updated_at: DateTime::now(),
        }
    }

    fn service() -> JwtService {
        JwtService::new("test-secret", "lucha-canaria-api", "lucha-canaria-clients", 24)
    }

    #[test]
    fn test_issue_then_verify() {
        let jwt = service();
        let token = jwt.issue(&coach()).unwrap();
        let claims = jwt.verify(&token).unwrap();

        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.role, UserRole::Coach);
        assert_eq!(claims.team_id.as_deref(), Some("t1"));
        assert!(claims.permissions.contains(&Permission::ManageOwnTeam));
        assert!(claims.own_team_only);
        assert_eq!(claims.exp - claims.iat, jwt.expires_in());
    }

    #[test]
    fn test_explicit_wrestler_grant_is_carried() {
        let jwt = service();
        let mut user = coach();
        user.permissions = vec![Permission::ManageWrestlers];

        let claims = jwt.verify(&jwt.issue(&user).unwrap()).unwrap();
        assert!(!claims.own_team_only);
    }

    #[test]
    fn test_rejects_other_secret() {
        let token = service().issue(&coach()).unwrap();
        let other = JwtService::new("other", "lucha-canaria-api", "lucha-canaria-clients", 24);
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_rejects_other_audience() {
        let token = service().issue(&coach()).unwrap();
        let other = JwtService::new("test-secret", "lucha-canaria-api", "somebody-else", 24);
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_rejects_expired_token() {
        let jwt = JwtService::new("test-secret", "lucha-canaria-api", "lucha-canaria-clients", -1);
        let token = jwt.issue(&coach()).unwrap();
        assert!(jwt.verify(&token).is_err());
    }
}
