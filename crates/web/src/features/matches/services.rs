use storage::{
    Database,
    dto::{
        common::PaginatedResponse,
        matches::{
            CreateMatchRequest, MatchFilter, MatchResponse, MatchResultRequest, UpdateMatchRequest,
        },
    },
    error::{Result, StorageError},
    models::Match,
    repository::{
        competition::CompetitionRepository, matches::MatchRepository, referee::RefereeRepository,
        team::TeamRepository,
    },
};

pub async fn list_matches(db: &Database, filter: &MatchFilter) -> Result<PaginatedResponse<MatchResponse>> {
    let repo = MatchRepository::new(db.mongo());
    let (matches, total) = repo.list(filter).await?;

    Ok(PaginatedResponse::new(matches, filter.pagination(), total).map(MatchResponse::from))
}

pub async fn get_match(db: &Database, id: &str) -> Result<MatchResponse> {
    let repo = MatchRepository::new(db.mongo());
    repo.find_by_id(id).await.map(MatchResponse::from)
}

pub async fn create_match(db: &Database, req: &CreateMatchRequest) -> Result<MatchResponse> {
    req.validate_teams()
        .map_err(|e| StorageError::InvalidInput(e.to_string()))?;

    match CompetitionRepository::new(db.mongo())
        .find_by_id(&req.competition_id)
        .await
    {
        Ok(_) => {}
        Err(StorageError::NotFound) => {
            return Err(StorageError::InvalidInput(format!(
                "Competition {} does not exist",
                req.competition_id
            )));
        }
        Err(e) => return Err(e),
    }
    ensure_participants_exist(db, &req.local_team_id, &req.visitor_team_id, req.referee_id.as_deref())
        .await?;

    let repo = MatchRepository::new(db.mongo());
    repo.create(req).await.map(MatchResponse::from)
}

pub async fn update_match(db: &Database, id: &str, req: &UpdateMatchRequest) -> Result<MatchResponse> {
    let repo = MatchRepository::new(db.mongo());
    let existing = repo.find_by_id(id).await?;

    let local = req.local_team_id.as_deref().unwrap_or(&existing.local_team_id);
    let visitor = req
        .visitor_team_id
        .as_deref()
        .unwrap_or(&existing.visitor_team_id);
    check_team_change(&existing, local, visitor)?;
    if local == visitor {
        return Err(StorageError::InvalidInput(
            "A team cannot play against itself".to_string(),
        ));
    }
    ensure_participants_exist(db, local, visitor, req.referee_id.as_deref()).await?;

    repo.update(&existing, req).await.map(MatchResponse::from)
}

/// Record the final score by hand. Fixtures with a match act take their
/// score from it.
pub async fn record_result(db: &Database, id: &str, req: &MatchResultRequest) -> Result<MatchResponse> {
    let repo = MatchRepository::new(db.mongo());
    let fixture = repo.find_by_id(id).await?;
    check_manual_result(&fixture)?;

    repo.record_result(&fixture.id, req.local_score, req.visitor_score)
        .await
        .map(MatchResponse::from)
}

/// Fixtures with a match act keep it as their record and cannot be deleted
pub async fn delete_match(db: &Database, id: &str) -> Result<()> {
    let repo = MatchRepository::new(db.mongo());
    let fixture = repo.find_by_id(id).await?;

    if fixture.match_act_id.is_some() {
        return Err(StorageError::ConstraintViolation(
            "Match has a match act and cannot be deleted".to_string(),
        ));
    }

    repo.delete(&fixture.id).await
}

fn check_manual_result(fixture: &Match) -> Result<()> {
    if fixture.match_act_id.is_some() {
        return Err(StorageError::ConstraintViolation(
            "Match has a match act; its result comes from the act".to_string(),
        ));
    }
    Ok(())
}

/// The act's rosters are bound to the fixture's teams and sides
fn check_team_change(fixture: &Match, local: &str, visitor: &str) -> Result<()> {
    let changed = local != fixture.local_team_id || visitor != fixture.visitor_team_id;
    if changed && fixture.match_act_id.is_some() {
        return Err(StorageError::ConstraintViolation(
            "Teams of a match with a match act cannot change".to_string(),
        ));
    }
    Ok(())
}

async fn ensure_participants_exist(
    db: &Database,
    local_team_id: &str,
    visitor_team_id: &str,
    referee_id: Option<&str>,
) -> Result<()> {
    let teams = TeamRepository::new(db.mongo());
    for team_id in [local_team_id, visitor_team_id] {
        match teams.find_by_id(team_id).await {
            Ok(_) => {}
            Err(StorageError::NotFound) => {
                return Err(StorageError::InvalidInput(format!(
                    "Team {} does not exist",
                    team_id
                )));
            }
            Err(e) => return Err(e),
        }
    }

    if let Some(referee_id) = referee_id {
        match RefereeRepository::new(db.mongo()).find_by_id(referee_id).await {
            Ok(_) => {}
            Err(StorageError::NotFound) => {
                return Err(StorageError::InvalidInput(format!(
                    "Referee {} does not exist",
                    referee_id
                )));
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::DateTime;

    fn fixture(match_act_id: Option<&str>) -> Match {
        let now = DateTime::now();
        Match {
            id: "m1".to_string(),
            competition_id: "c1".to_string(),
            round: 1,
            local_team_id: "t1".to_string(),
            visitor_team_id: "t2".to_string(),
            local_score: 0,
            visitor_score: 0,
            date: now,
            venue: "Terrero".to_string(),
            completed: false,
            referee_id: None,
            match_act_id: match_act_id.map(str::to_string),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_manual_result_only_without_act() {
        assert!(check_manual_result(&fixture(None)).is_ok());
        assert!(matches!(
            check_manual_result(&fixture(Some("a1"))),
            Err(StorageError::ConstraintViolation(_))
        ));
    }

    #[test]
    fn test_teams_are_locked_once_an_act_exists() {
        assert!(check_team_change(&fixture(None), "t3", "t2").is_ok());
        assert!(check_team_change(&fixture(Some("a1")), "t1", "t2").is_ok());
        assert!(matches!(
            check_team_change(&fixture(Some("a1")), "t2", "t1"),
            Err(StorageError::ConstraintViolation(_))
        ));
    }
}
