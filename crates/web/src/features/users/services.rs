use storage::{
    Database,
    dto::{
        common::PaginatedResponse,
        user::{UpdateUserRequest, UserFilter, UserResponse},
    },
    error::{Result, StorageError},
    repository::{team::TeamRepository, user::UserRepository},
};

pub async fn list_users(db: &Database, filter: &UserFilter) -> Result<PaginatedResponse<UserResponse>> {
    let repo = UserRepository::new(db.mongo());
    let (users, total) = repo.list(filter).await?;

    Ok(PaginatedResponse::new(users, filter.pagination(), total).map(UserResponse::from))
}

pub async fn get_user(db: &Database, id: &str) -> Result<UserResponse> {
    let repo = UserRepository::new(db.mongo());
    repo.find_by_id(id).await.map(UserResponse::from)
}

/// The associated team, when given, must exist; `null` clears it
pub async fn update_user(db: &Database, id: &str, req: &UpdateUserRequest) -> Result<UserResponse> {
    if let Some(Some(team_id)) = &req.associated_team_id {
        if team_id.trim().is_empty() {
            return Err(StorageError::InvalidInput(
                "associatedTeamId cannot be blank".to_string(),
            ));
        }
        TeamRepository::new(db.mongo()).find_by_id(team_id).await?;
    }

    let repo = UserRepository::new(db.mongo());
    let existing = repo.find_by_id(id).await?;
    repo.update(&existing, req).await.map(UserResponse::from)
}

pub async fn deactivate_user(db: &Database, id: &str) -> Result<()> {
    let repo = UserRepository::new(db.mongo());
    repo.deactivate(id).await
}
