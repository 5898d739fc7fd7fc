use bson::DateTime;
use serde::{Deserialize, Serialize};

use super::{Permission, UserRole};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub role: UserRole,
    pub associated_team_id: Option<String>,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    pub password_hash: String,
    #[serde(default = "active")]
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

fn active() -> bool {
    true
}

impl User {
    /// Role defaults plus the explicit grants stored on the account, sorted
    /// and without duplicates
    pub fn effective_permissions(&self) -> Vec<Permission> {
        let mut permissions: Vec<Permission> = self
            .role
            .default_permissions()
            .iter()
            .chain(self.permissions.iter())
            .copied()
            .collect();
        permissions.sort();
        permissions.dedup();
        permissions
    }

    /// Coaches whose wrestler rights come only from their role may write
    /// wrestlers of their associated team and no other
    pub fn wrestler_writes_own_team_only(&self) -> bool {
        self.role == UserRole::Coach && !self.permissions.contains(&Permission::ManageWrestlers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole, permissions: Vec<Permission>) -> User {
        User {
            id: "u1".to_string(),
            email: "coach@example.com".to_string(),
            name: "Pedro".to_string(),
            surname: "Hernández".to_string(),
            role,
            associated_team_id: Some("t1".to_string()),
            permissions,
            password_hash: String::new(),
            is_active: true,
            created_at: DateTime::now(),
            updated_at: DateTime::now(),
        }
    }

    #[test]
    fn test_effective_permissions_merge_role_and_grants() {
        let coach = user(UserRole::Coach, vec![Permission::ManageMatchActs]);
        assert_eq!(
            coach.effective_permissions(),
            vec![
                Permission::ManageOwnTeam,
                Permission::ManageWrestlers,
                Permission::ManageMatchActs,
            ]
        );
    }

    #[test]
    fn test_effective_permissions_deduplicate() {
        let referee = user(UserRole::Referee, vec![Permission::ManageMatchActs]);
        assert_eq!(referee.effective_permissions(), vec![Permission::ManageMatchActs]);
    }

    #[test]
    fn test_explicit_wrestler_grant_lifts_coach_scoping() {
        let confined = |role, grants| user(role, grants).wrestler_writes_own_team_only();

        assert!(confined(UserRole::Coach, vec![]));
        assert!(confined(UserRole::Coach, vec![Permission::ManageTeams]));
        assert!(!confined(UserRole::Coach, vec![Permission::ManageWrestlers]));
        assert!(!confined(UserRole::FederativeDelegate, vec![]));
    }
}
