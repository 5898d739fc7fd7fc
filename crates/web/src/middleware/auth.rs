use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use storage::models::{Permission, UserRole};

use crate::auth::{Claims, JwtService};
use crate::error::{WebError, WebResult};

/// Rejects requests without a valid bearer token and hands the caller to
/// the handler as an [`AuthUser`] extension.
pub async fn require_auth(
    State(jwt): State<JwtService>,
    mut request: Request,
    next: Next,
) -> Result<Response, WebError> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| WebError::Unauthorized("Missing bearer token".to_string()))?;

    let claims = jwt.verify(token).map_err(|e| {
        tracing::warn!("Rejected access token: {}", e);
        WebError::Unauthorized("Invalid or expired token".to_string())
    })?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// The authenticated caller, as stated by its token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub role: UserRole,
    pub permissions: Vec<Permission>,
    pub team_id: Option<String>,
    pub own_team_only: bool,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
            permissions: claims.permissions,
            team_id: claims.team_id,
            own_team_only: claims.own_team_only,
        }
    }
}

impl AuthUser {
    pub fn has(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    pub fn require(&self, permission: Permission) -> WebResult<()> {
        if self.has(permission) {
            Ok(())
        } else {
            tracing::warn!(user = %self.id, ?permission, "Permission denied");
            Err(WebError::Forbidden)
        }
    }

    fn owns_team(&self, team_id: &str) -> bool {
        self.team_id.as_deref() == Some(team_id)
    }

    /// Team editors, or a coach editing the team they are associated with
    pub fn require_team_editor(&self, team_id: &str) -> WebResult<()> {
        if self.has(Permission::ManageTeams)
            || (self.has(Permission::ManageOwnTeam) && self.owns_team(team_id))
        {
            Ok(())
        } else {
            tracing::warn!(user = %self.id, team = team_id, "Team edit denied");
            Err(WebError::Forbidden)
        }
    }

    /// Wrestler writes. Coaches holding the right only through their role
    /// are confined to the wrestlers of their own team.
    pub fn require_wrestler_editor(&self, team_id: &str) -> WebResult<()> {
        self.require(Permission::ManageWrestlers)?;

        if self.own_team_only && !self.owns_team(team_id) {
            tracing::warn!(user = %self.id, team = team_id, "Wrestler edit outside own team");
            return Err(WebError::Forbidden);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn caller(role: UserRole, team_id: Option<&str>) -> AuthUser {
        AuthUser {
            id: "u1".to_string(),
            email: "someone@example.com".to_string(),
            role,
            permissions: role.default_permissions().to_vec(),
            team_id: team_id.map(str::to_string),
            own_team_only: role == UserRole::Coach,
        }
    }

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));
    }

    #[test]
    fn test_guest_holds_no_permission() {
        let guest = caller(UserRole::Guest, None);
        assert!(guest.require(Permission::ManageTeams).is_err());
        assert!(guest.require_team_editor("t1").is_err());
        assert!(guest.require_wrestler_editor("t1").is_err());
    }

    #[test]
    fn test_coach_is_confined_to_own_team() {
        let coach = caller(UserRole::Coach, Some("t1"));
        assert!(coach.require_team_editor("t1").is_ok());
        assert!(coach.require_team_editor("t2").is_err());
        assert!(coach.require_wrestler_editor("t1").is_ok());
        assert!(coach.require_wrestler_editor("t2").is_err());
    }

    #[test]
    fn test_coach_with_explicit_wrestler_grant_edits_any_team() {
        let mut coach = caller(UserRole::Coach, Some("t1"));
        coach.own_team_only = false;

        assert!(coach.require_wrestler_editor("t2").is_ok());
        assert!(coach.require_team_editor("t2").is_err());
    }

    #[test]
    fn test_coach_without_team_edits_nothing() {
        let coach = caller(UserRole::Coach, None);
        assert!(coach.require_team_editor("t1").is_err());
        assert!(coach.require_wrestler_editor("t1").is_err());
    }

    #[test]
    fn test_delegate_edits_any_team() {
        let delegate = caller(UserRole::FederativeDelegate, None);
        assert!(delegate.require_team_editor("t9").is_ok());
        assert!(delegate.require_wrestler_editor("t9").is_ok());
        assert!(delegate.require(Permission::ManageUsers).is_err());
    }
}
