use storage::{
    Database,
    dto::{
        common::PaginatedResponse,
        team::{CreateTeamRequest, TeamFilter, TeamResponse, UpdateTeamRequest},
        wrestler::WrestlerResponse,
    },
    error::Result,
    repository::{team::TeamRepository, wrestler::WrestlerRepository},
};

pub async fn list_teams(db: &Database, filter: &TeamFilter) -> Result<PaginatedResponse<TeamResponse>> {
    let repo = TeamRepository::new(db.mongo());
    let (teams, total) = repo.list(filter).await?;

    Ok(PaginatedResponse::new(teams, filter.pagination(), total).map(TeamResponse::from))
}

pub async fn get_team(db: &Database, id: &str) -> Result<TeamResponse> {
    let repo = TeamRepository::new(db.mongo());
    repo.find_by_id(id).await.map(TeamResponse::from)
}

/// Active roster of an active team
pub async fn list_team_wrestlers(db: &Database, id: &str) -> Result<Vec<WrestlerResponse>> {
    TeamRepository::new(db.mongo()).find_by_id(id).await?;

    let wrestlers = WrestlerRepository::new(db.mongo()).list_by_team(id).await?;
    Ok(wrestlers.into_iter().map(WrestlerResponse::from).collect())
}

pub async fn create_team(db: &Database, req: &CreateTeamRequest) -> Result<TeamResponse> {
    let repo = TeamRepository::new(db.mongo());
    repo.create(req).await.map(TeamResponse::from)
}

pub async fn update_team(db: &Database, id: &str, req: &UpdateTeamRequest) -> Result<TeamResponse> {
    let repo = TeamRepository::new(db.mongo());
    let existing = repo.find_by_id(id).await?;
    repo.update(&existing, req).await.map(TeamResponse::from)
}

pub async fn deactivate_team(db: &Database, id: &str) -> Result<()> {
    let repo = TeamRepository::new(db.mongo());
    repo.deactivate(id).await
}
