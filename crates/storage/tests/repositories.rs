//! Repository tests against a live MongoDB. Set `MONGODB_TEST_URI` to run
//! them; each test works in its own throwaway database.

use storage::{
    Database, PoolSettings,
    dto::{
        matches::CreateMatchRequest,
        team::{CreateTeamRequest, TeamFilter},
        wrestler::{CreateWrestlerRequest, WrestlerFilter},
    },
    error::StorageError,
    models::{AgeCategory, DivisionCategory, FavoriteType, Island, UserRole, WrestlerClassification},
    repository::{
        favorite::FavoriteRepository,
        matches::MatchRepository,
        team::TeamRepository,
        user::{NewUser, UserRepository},
        wrestler::WrestlerRepository,
    },
};

async fn test_db() -> Option<Database> {
    let uri = std::env::var("MONGODB_TEST_URI").ok()?;
    let name = format!("lucha_canaria_test_{}", uuid::Uuid::new_v4().simple());
    let db = Database::new(&uri, &name, &PoolSettings::default())
        .await
        .unwrap();
    db.ensure_indexes().await.unwrap();
    Some(db)
}

async fn drop_db(db: Database) {
    db.mongo().drop().await.unwrap();
}

fn team_request(name: &str) -> CreateTeamRequest {
    CreateTeamRequest {
        name: name.to_string(),
        image_url: None,
        island: Island::Tenerife,
        venue: "Terrero Municipal".to_string(),
        division_category: DivisionCategory::Primera,
    }
}

fn wrestler_request(license: &str, team_id: &str) -> CreateWrestlerRequest {
    CreateWrestlerRequest {
        license_number: license.to_string(),
        name: "Francisco".to_string(),
        surname: "Pérez".to_string(),
        team_id: team_id.to_string(),
        category: AgeCategory::Senior,
        classification: WrestlerClassification::PuntalA,
        height: Some(185.0),
        weight: Some(110.0),
        birth_date: None,
        nickname: None,
        image_url: None,
    }
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let Some(db) = test_db().await else { return };
    let repo = UserRepository::new(db.mongo());

    let new_user = |email| NewUser {
        email,
        name: "Pedro",
        surname: "Díaz",
        role: UserRole::Guest,
        password_hash: "hash".to_string(),
    };

    let created = repo.create(new_user("pedro@example.com")).await.unwrap();
    let found = repo.find_by_email("PEDRO@example.com").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(created.id));

    let err = repo.create(new_user("Pedro@Example.com")).await.unwrap_err();
    assert!(matches!(err, StorageError::ConstraintViolation(_)));

    drop_db(db).await;
}

#[tokio::test]
async fn test_deactivated_team_is_hidden() {
    let Some(db) = test_db().await else { return };
    let repo = TeamRepository::new(db.mongo());

    let kept = repo.create(&team_request("C.L. Tegueste")).await.unwrap();
    let gone = repo.create(&team_request("C.L. Tacoronte")).await.unwrap();
    repo.deactivate(&gone.id).await.unwrap();

    let (teams, total) = repo.list(&TeamFilter::default()).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(teams[0].id, kept.id);
    assert!(matches!(
        repo.find_by_id(&gone.id).await,
        Err(StorageError::NotFound)
    ));

    drop_db(db).await;
}

#[tokio::test]
async fn test_wrestler_pagination_and_license_uniqueness() {
    let Some(db) = test_db().await else { return };
    let repo = WrestlerRepository::new(db.mongo());

    for n in 0..5 {
        repo.create(&wrestler_request(&format!("TF-{n:04}"), "t1"))
            .await
            .unwrap();
    }

    let filter = WrestlerFilter {
        page: Some(3),
        size: Some(2),
        ..Default::default()
    };
    let (page, total) = repo.list(&filter).await.unwrap();
    assert_eq!(total, 5);
    assert_eq!(page.len(), 1);

    let err = repo
        .create(&wrestler_request("TF-0000", "t2"))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::ConstraintViolation(_)));

    drop_db(db).await;
}

#[tokio::test]
async fn test_favorites_are_idempotent() {
    let Some(db) = test_db().await else { return };
    let repo = FavoriteRepository::new(db.mongo());

    let first = repo.add("u1", "w1", FavoriteType::Wrestler).await.unwrap();
    let second = repo.add("u1", "w1", FavoriteType::Wrestler).await.unwrap();
    assert_eq!(first.id, second.id);
    assert!(repo.exists("u1", "w1", FavoriteType::Wrestler).await.unwrap());
    assert!(!repo.exists("u1", "w1", FavoriteType::Team).await.unwrap());

    assert!(repo.remove("u1", "w1", FavoriteType::Wrestler).await.unwrap());
    assert!(!repo.remove("u1", "w1", FavoriteType::Wrestler).await.unwrap());
    assert!(repo.list_by_user("u1", None).await.unwrap().is_empty());

    drop_db(db).await;
}

#[tokio::test]
async fn test_match_result_and_act_link_round_trip() {
    let Some(db) = test_db().await else { return };
    let repo = MatchRepository::new(db.mongo());

    let fixture = repo
        .create(&CreateMatchRequest {
            competition_id: "c1".to_string(),
            round: 2,
            local_team_id: "t1".to_string(),
            visitor_team_id: "t2".to_string(),
            date: chrono::Utc::now(),
            venue: "Terrero de Tegueste".to_string(),
            referee_id: None,
        })
        .await
        .unwrap();
    assert!(!fixture.completed);

    repo.link_match_act(&fixture.id, Some("a1")).await.unwrap();
    let closed = repo.record_result(&fixture.id, 7, 5).await.unwrap();
    assert_eq!((closed.local_score, closed.visitor_score), (7, 5));
    assert!(closed.completed);
    assert_eq!(closed.match_act_id.as_deref(), Some("a1"));

    repo.link_match_act(&fixture.id, None).await.unwrap();
    let stored = repo.find_by_id(&fixture.id).await.unwrap();
    assert_eq!(stored.match_act_id, None);
    assert_eq!((stored.local_score, stored.visitor_score), (7, 5));

    assert!(matches!(
        repo.record_result("missing", 1, 0).await,
        Err(StorageError::NotFound)
    ));

    drop_db(db).await;
}
