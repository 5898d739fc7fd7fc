use mongodb::bson::DateTime;
use storage::{
    Database,
    dto::{
        common::PaginatedResponse,
        match_act::{
            CreateMatchActRequest, MatchActFilter, MatchActResponse, UpdateMatchActRequest,
        },
    },
    error::{Result, StorageError},
    models::{MatchAct, SignatureParty, new_id},
    repository::{match_act::MatchActRepository, matches::MatchRepository},
    services::match_act_scoring,
};

use crate::middleware::auth::AuthUser;

pub async fn list_match_acts(
    db: &Database,
    filter: &MatchActFilter,
) -> Result<PaginatedResponse<MatchActResponse>> {
    let repo = MatchActRepository::new(db.mongo());
    let (acts, total) = repo.list(filter).await?;

    Ok(PaginatedResponse::new(acts, filter.pagination(), total).map(MatchActResponse::from))
}

pub async fn get_match_act(db: &Database, id: &str) -> Result<MatchActResponse> {
    let repo = MatchActRepository::new(db.mongo());
    repo.find_by_id(id).await.map(MatchActResponse::from)
}

pub async fn get_match_act_by_match(db: &Database, match_id: &str) -> Result<MatchActResponse> {
    let repo = MatchActRepository::new(db.mongo());
    repo.find_by_match(match_id).await.map(MatchActResponse::from)
}

/// Open the act of a match as a scored draft and link it to the fixture
pub async fn create_match_act(
    db: &Database,
    user: &AuthUser,
    req: &CreateMatchActRequest,
) -> Result<MatchActResponse> {
    let matches = MatchRepository::new(db.mongo());
    let fixture = match matches.find_by_id(&req.match_id).await {
        Ok(fixture) => fixture,
        Err(StorageError::NotFound) => {
            return Err(StorageError::InvalidInput(format!(
                "Match {} does not exist",
                req.match_id
            )));
        }
        Err(e) => return Err(e),
    };

    match_act_scoring::check_rosters(&fixture, &req.local_team, &req.visitor_team)?;
    match_act_scoring::validate_bouts(&req.bouts, &req.local_team, &req.visitor_team)?;

    let now = DateTime::now();
    let mut act = MatchAct {
        id: new_id(),
        match_id: fixture.id.clone(),
        competition_id: fixture.competition_id.clone(),
        season: req.season.clone(),
        category: req.category,
        island: req.island,
        venue: req.venue.clone().unwrap_or_else(|| fixture.venue.clone()),
        date: req.date.map(DateTime::from_chrono).unwrap_or(fixture.date),
        start_time: req.start_time.clone(),
        end_time: req.end_time.clone(),
        main_referee: req.main_referee.clone(),
        assistant_referees: req.assistant_referees.clone(),
        local_team: req.local_team.clone(),
        visitor_team: req.visitor_team.clone(),
        bouts: req.bouts.clone(),
        local_score: 0,
        visitor_score: 0,
        winner: None,
        comments: req.comments.clone(),
        is_draft: true,
        is_completed: false,
        local_captain_signed: false,
        visitor_captain_signed: false,
        referee_signed: false,
        signed_at: None,
        created_by: user.id.clone(),
        created_at: now,
        updated_at: now,
    };
    match_act_scoring::score_match_act(&mut act);

    let acts = MatchActRepository::new(db.mongo());
    acts.insert(&act).await?;
    if let Err(e) = matches.link_match_act(&fixture.id, Some(&act.id)).await {
        tracing::error!(
            act = %act.id,
            fixture = %fixture.id,
            "Linking match act failed, removing it: {}",
            e
        );
        if let Err(cleanup) = acts.delete(&act.id).await {
            tracing::error!(act = %act.id, "Orphaned match act left behind: {}", cleanup);
        }
        return Err(e);
    }
    tracing::info!(by = %user.id, act = %act.id, fixture = %fixture.id, "Match act opened");

    Ok(MatchActResponse::from(act))
}

/// Edit an unsigned act. Bouts are re-scored; a completed act must stay
/// fully decided and its fixture result follows the new score.
pub async fn update_match_act(
    db: &Database,
    id: &str,
    req: &UpdateMatchActRequest,
) -> Result<MatchActResponse> {
    let repo = MatchActRepository::new(db.mongo());
    let mut act = repo.find_by_id(id).await?;
    let matches = MatchRepository::new(db.mongo());
    let fixture = matches.find_by_id(&act.match_id).await?;

    match_act_scoring::apply_update(&mut act, req, &fixture)?;
    act.updated_at = DateTime::now();
    repo.replace(&act).await?;

    if let Some((local, visitor)) = match_act_scoring::fixture_result(&act) {
        matches.record_result(&act.match_id, local, visitor).await?;
    }

    Ok(MatchActResponse::from(act))
}

/// Close the act and write its score into the fixture
pub async fn complete_match_act(db: &Database, id: &str) -> Result<MatchActResponse> {
    let repo = MatchActRepository::new(db.mongo());
    let mut act = repo.find_by_id(id).await?;

    match_act_scoring::complete(&mut act)?;
    act.updated_at = DateTime::now();
    repo.replace(&act).await?;

    if let Some((local, visitor)) = match_act_scoring::fixture_result(&act) {
        MatchRepository::new(db.mongo())
            .record_result(&act.match_id, local, visitor)
            .await?;
    }
    tracing::info!(
        act = %act.id,
        local = act.local_score,
        visitor = act.visitor_score,
        "Match act completed"
    );

    Ok(MatchActResponse::from(act))
}

pub async fn sign_match_act(
    db: &Database,
    id: &str,
    party: SignatureParty,
) -> Result<MatchActResponse> {
    let repo = MatchActRepository::new(db.mongo());
    let mut act = repo.find_by_id(id).await?;

    let now = DateTime::now();
    match_act_scoring::sign(&mut act, party, now)?;
    act.updated_at = now;
    repo.replace(&act).await?;

    if act.is_fully_signed() {
        tracing::info!(act = %act.id, "Match act fully signed");
    }

    Ok(MatchActResponse::from(act))
}

/// Remove an unsigned act and unlink it from its fixture
pub async fn delete_match_act(db: &Database, id: &str) -> Result<()> {
    let repo = MatchActRepository::new(db.mongo());
    let act = repo.find_by_id(id).await?;

    match_act_scoring::ensure_unsigned(&act, "deleted")?;

    repo.delete(&act.id).await?;
    MatchRepository::new(db.mongo())
        .link_match_act(&act.match_id, None)
        .await
}
