use storage::{
    Database,
    dto::favorite::{FavoriteResponse, FavoriteStatusResponse},
    error::Result,
    models::FavoriteType,
    repository::{
        competition::CompetitionRepository, favorite::FavoriteRepository, team::TeamRepository,
        wrestler::WrestlerRepository,
    },
};

pub async fn list_favorites(
    db: &Database,
    user_id: &str,
    entity_type: Option<FavoriteType>,
) -> Result<Vec<FavoriteResponse>> {
    let repo = FavoriteRepository::new(db.mongo());
    let favorites = repo.list_by_user(user_id, entity_type).await?;

    Ok(favorites.into_iter().map(FavoriteResponse::from).collect())
}

/// Mark an existing entity as favorite. Adding it twice returns the
/// original record.
pub async fn add_favorite(
    db: &Database,
    user_id: &str,
    entity_id: &str,
    entity_type: FavoriteType,
) -> Result<FavoriteResponse> {
    match entity_type {
        FavoriteType::Team => {
            TeamRepository::new(db.mongo()).find_by_id(entity_id).await?;
        }
        FavoriteType::Wrestler => {
            WrestlerRepository::new(db.mongo()).find_by_id(entity_id).await?;
        }
        FavoriteType::Competition => {
            CompetitionRepository::new(db.mongo()).find_by_id(entity_id).await?;
        }
    }

    let repo = FavoriteRepository::new(db.mongo());
    repo.add(user_id, entity_id, entity_type)
        .await
        .map(FavoriteResponse::from)
}

pub async fn remove_favorite(
    db: &Database,
    user_id: &str,
    entity_id: &str,
    entity_type: FavoriteType,
) -> Result<()> {
    let repo = FavoriteRepository::new(db.mongo());
    if !repo.remove(user_id, entity_id, entity_type).await? {
        tracing::debug!(user = user_id, entity = entity_id, "Favorite was not set");
    }
    Ok(())
}

pub async fn favorite_status(
    db: &Database,
    user_id: &str,
    entity_id: &str,
    entity_type: FavoriteType,
) -> Result<FavoriteStatusResponse> {
    let repo = FavoriteRepository::new(db.mongo());
    let is_favorite = repo.exists(user_id, entity_id, entity_type).await?;

    Ok(FavoriteStatusResponse { is_favorite })
}
