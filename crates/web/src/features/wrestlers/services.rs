use storage::{
    Database,
    dto::{
        common::PaginatedResponse,
        wrestler::{CreateWrestlerRequest, UpdateWrestlerRequest, WrestlerFilter, WrestlerResponse},
    },
    error::{Result, StorageError},
    repository::{team::TeamRepository, wrestler::WrestlerRepository},
};

use crate::error::WebResult;
use crate::middleware::auth::AuthUser;

pub async fn list_wrestlers(
    db: &Database,
    filter: &WrestlerFilter,
) -> Result<PaginatedResponse<WrestlerResponse>> {
    let repo = WrestlerRepository::new(db.mongo());
    let (wrestlers, total) = repo.list(filter).await?;

    Ok(PaginatedResponse::new(wrestlers, filter.pagination(), total).map(WrestlerResponse::from))
}

pub async fn get_wrestler(db: &Database, id: &str) -> Result<WrestlerResponse> {
    let repo = WrestlerRepository::new(db.mongo());
    repo.find_by_id(id).await.map(WrestlerResponse::from)
}

pub async fn get_wrestler_by_license(db: &Database, license_number: &str) -> Result<WrestlerResponse> {
    let repo = WrestlerRepository::new(db.mongo());
    repo.find_by_license(license_number)
        .await
        .map(WrestlerResponse::from)
}

pub async fn create_wrestler(
    db: &Database,
    user: &AuthUser,
    req: &CreateWrestlerRequest,
) -> WebResult<WrestlerResponse> {
    user.require_wrestler_editor(&req.team_id)?;
    ensure_team_exists(db, &req.team_id).await?;

    let repo = WrestlerRepository::new(db.mongo());
    let wrestler = repo.create(req).await?;
    tracing::info!(by = %user.id, wrestler = %wrestler.id, "Wrestler registered");

    Ok(WrestlerResponse::from(wrestler))
}

/// Moving a wrestler to another team needs edit rights on both teams
pub async fn update_wrestler(
    db: &Database,
    user: &AuthUser,
    id: &str,
    req: &UpdateWrestlerRequest,
) -> WebResult<WrestlerResponse> {
    let repo = WrestlerRepository::new(db.mongo());
    let existing = repo.find_by_id(id).await?;
    user.require_wrestler_editor(&existing.team_id)?;

    if let Some(team_id) = req.team_id.as_deref().filter(|t| *t != existing.team_id) {
        user.require_wrestler_editor(team_id)?;
        ensure_team_exists(db, team_id).await?;
    }

    let wrestler = repo.update(&existing, req).await?;
    Ok(WrestlerResponse::from(wrestler))
}

pub async fn deactivate_wrestler(db: &Database, user: &AuthUser, id: &str) -> WebResult<()> {
    let repo = WrestlerRepository::new(db.mongo());
    let existing = repo.find_by_id(id).await?;
    user.require_wrestler_editor(&existing.team_id)?;

    repo.deactivate(id).await?;
    tracing::info!(by = %user.id, wrestler = %id, "Wrestler deactivated");

    Ok(())
}

async fn ensure_team_exists(db: &Database, team_id: &str) -> Result<()> {
    match TeamRepository::new(db.mongo()).find_by_id(team_id).await {
        Ok(_) => Ok(()),
        Err(StorageError::NotFound) => Err(StorageError::InvalidInput(format!(
            "Team {} does not exist",
            team_id
        ))),
        Err(e) => Err(e),
    }
}
