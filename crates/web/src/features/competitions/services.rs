use storage::{
    Database,
    dto::{
        common::PaginatedResponse,
        competition::{
            CompetitionDetailResponse, CompetitionFilter, CompetitionResponse,
            CreateCompetitionRequest, UpdateCompetitionRequest, group_match_days,
        },
        matches::MatchResponse,
        team::TeamResponse,
    },
    error::{Result, StorageError},
    repository::{competition::CompetitionRepository, matches::MatchRepository, team::TeamRepository},
};

pub async fn list_competitions(
    db: &Database,
    filter: &CompetitionFilter,
) -> Result<PaginatedResponse<CompetitionResponse>> {
    let repo = CompetitionRepository::new(db.mongo());
    let (competitions, total) = repo.list(filter).await?;

    Ok(PaginatedResponse::new(competitions, filter.pagination(), total)
        .map(CompetitionResponse::from))
}

/// Competition with its active teams and its fixtures grouped by round
pub async fn get_competition_detailed(db: &Database, id: &str) -> Result<CompetitionDetailResponse> {
    let competition = CompetitionRepository::new(db.mongo()).find_by_id(id).await?;

    let teams = TeamRepository::new(db.mongo())
        .find_by_ids(&competition.team_ids)
        .await?;
    let matches = MatchRepository::new(db.mongo())
        .list_by_competition(&competition.id)
        .await?;

    Ok(CompetitionDetailResponse {
        competition: CompetitionResponse::from(competition),
        teams: teams.into_iter().map(TeamResponse::from).collect(),
        match_days: group_match_days(matches.into_iter().map(MatchResponse::from).collect()),
    })
}

pub async fn create_competition(
    db: &Database,
    req: &CreateCompetitionRequest,
) -> Result<CompetitionResponse> {
    ensure_teams_exist(db, &req.team_ids).await?;

    let repo = CompetitionRepository::new(db.mongo());
    repo.create(req).await.map(CompetitionResponse::from)
}

pub async fn update_competition(
    db: &Database,
    id: &str,
    req: &UpdateCompetitionRequest,
) -> Result<CompetitionResponse> {
    if let Some(team_ids) = &req.team_ids {
        ensure_teams_exist(db, team_ids).await?;
    }

    let repo = CompetitionRepository::new(db.mongo());
    let existing = repo.find_by_id(id).await?;
    repo.update(&existing, req).await.map(CompetitionResponse::from)
}

/// Competitions with fixtures cannot be deleted
pub async fn delete_competition(db: &Database, id: &str) -> Result<()> {
    let repo = CompetitionRepository::new(db.mongo());
    let competition = repo.find_by_id(id).await?;

    let fixtures = MatchRepository::new(db.mongo())
        .count_by_competition(&competition.id)
        .await?;
    if fixtures > 0 {
        return Err(StorageError::ConstraintViolation(format!(
            "Competition has {} matches and cannot be deleted",
            fixtures
        )));
    }

    repo.delete(&competition.id).await
}

pub async fn add_team(db: &Database, id: &str, team_id: &str) -> Result<CompetitionResponse> {
    TeamRepository::new(db.mongo()).find_by_id(team_id).await?;

    let repo = CompetitionRepository::new(db.mongo());
    repo.add_team(id, team_id).await?;
    repo.find_by_id(id).await.map(CompetitionResponse::from)
}

pub async fn remove_team(db: &Database, id: &str, team_id: &str) -> Result<CompetitionResponse> {
    let repo = CompetitionRepository::new(db.mongo());
    repo.remove_team(id, team_id).await?;
    repo.find_by_id(id).await.map(CompetitionResponse::from)
}

async fn ensure_teams_exist(db: &Database, team_ids: &[String]) -> Result<()> {
    let found = TeamRepository::new(db.mongo()).find_by_ids(team_ids).await?;

    if let Some(missing) = team_ids
        .iter()
        .find(|id| !found.iter().any(|team| &team.id == *id))
    {
        return Err(StorageError::InvalidInput(format!(
            "Team {} does not exist",
            missing
        )));
    }

    Ok(())
}
