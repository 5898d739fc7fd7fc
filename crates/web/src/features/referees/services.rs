use storage::{
    Database,
    dto::{
        common::PaginatedResponse,
        referee::{CreateRefereeRequest, RefereeFilter, RefereeResponse, UpdateRefereeRequest},
    },
    error::Result,
    repository::referee::RefereeRepository,
};

pub async fn list_referees(
    db: &Database,
    filter: &RefereeFilter,
) -> Result<PaginatedResponse<RefereeResponse>> {
    let repo = RefereeRepository::new(db.mongo());
    let (referees, total) = repo.list(filter).await?;

    Ok(PaginatedResponse::new(referees, filter.pagination(), total).map(RefereeResponse::from))
}

pub async fn get_referee(db: &Database, id: &str) -> Result<RefereeResponse> {
    let repo = RefereeRepository::new(db.mongo());
    repo.find_by_id(id).await.map(RefereeResponse::from)
}

pub async fn create_referee(db: &Database, req: &CreateRefereeRequest) -> Result<RefereeResponse> {
    let repo = RefereeRepository::new(db.mongo());
    repo.create(req).await.map(RefereeResponse::from)
}

pub async fn update_referee(
    db: &Database,
    id: &str,
    req: &UpdateRefereeRequest,
) -> Result<RefereeResponse> {
    let repo = RefereeRepository::new(db.mongo());
    let existing = repo.find_by_id(id).await?;
    repo.update(&existing, req).await.map(RefereeResponse::from)
}

pub async fn deactivate_referee(db: &Database, id: &str) -> Result<()> {
    let repo = RefereeRepository::new(db.mongo());
    repo.deactivate(id).await
}
