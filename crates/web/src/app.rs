use std::time::Duration;

use axum::{Router, extract::FromRef};
use storage::Database;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::{JwtService, PasswordHasher};
use crate::features;

/// Shared state handed to every handler
#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: Database,
    pub jwt: JwtService,
    pub passwords: PasswordHasher,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        features::health::handlers::health,
        features::auth::handlers::login,
        features::auth::handlers::register,
        features::auth::handlers::me,
        features::users::handlers::list_users,
        features::users::handlers::get_user,
        features::users::handlers::update_user,
        features::users::handlers::delete_user,
        features::teams::handlers::list_teams,
        features::teams::handlers::get_team,
        features::teams::handlers::list_team_wrestlers,
        features::teams::handlers::create_team,
        features::teams::handlers::update_team,
        features::teams::handlers::delete_team,
        features::wrestlers::handlers::list_wrestlers,
        features::wrestlers::handlers::get_wrestler,
        features::wrestlers::handlers::get_wrestler_by_license,
        features::wrestlers::handlers::create_wrestler,
        features::wrestlers::handlers::update_wrestler,
        features::wrestlers::handlers::delete_wrestler,
        features::competitions::handlers::list_competitions,
        features::competitions::handlers::get_competition,
        features::competitions::handlers::create_competition,
        features::competitions::handlers::update_competition,
        features::competitions::handlers::delete_competition,
        features::competitions::handlers::add_team,
        features::competitions::handlers::remove_team,
        features::matches::handlers::list_matches,
        features::matches::handlers::get_match,
        features::matches::handlers::create_match,
        features::matches::handlers::update_match,
        features::matches::handlers::record_result,
        features::matches::handlers::delete_match,
        features::match_acts::handlers::list_match_acts,
        features::match_acts::handlers::get_match_act,
        features::match_acts::handlers::get_match_act_by_match,
        features::match_acts::handlers::create_match_act,
        features::match_acts::handlers::update_match_act,
        features::match_acts::handlers::complete_match_act,
        features::match_acts::handlers::sign_match_act,
        features::match_acts::handlers::delete_match_act,
        features::referees::handlers::list_referees,
        features::referees::handlers::get_referee,
        features::referees::handlers::create_referee,
        features::referees::handlers::update_referee,
        features::referees::handlers::delete_referee,
        features::favorites::handlers::list_favorites,
        features::favorites::handlers::add_favorite,
        features::favorites::handlers::remove_favorite,
        features::favorites::handlers::favorite_status,
    ),
    components(
        schemas(
            storage::dto::common::PaginationMeta,
            storage::models::UserRole,
            storage::models::Permission,
            storage::models::Island,
            storage::models::DivisionCategory,
            storage::models::AgeCategory,
            storage::models::WrestlerClassification,
            storage::models::FavoriteType,
            storage::models::BoutWinner,
            storage::models::SignatureParty,
            storage::models::RefereeInfo,
            storage::models::TeamRoster,
            storage::models::RosterEntry,
            storage::models::Bout,
        )
    ),
    tags(
        (name = "health", description = "Service status"),
        (name = "auth", description = "Login, registration and current account"),
        (name = "users", description = "Account administration"),
        (name = "teams", description = "Clubs"),
        (name = "wrestlers", description = "Licensed wrestlers"),
        (name = "competitions", description = "Leagues and tournaments"),
        (name = "matches", description = "Fixtures between two teams"),
        (name = "match-acts", description = "Official bout records of a match"),
        (name = "referees", description = "Licensed referees"),
        (name = "favorites", description = "Entities followed by the caller"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/health", features::health::routes())
        .nest("/auth", features::auth::routes(&state))
        .nest("/users", features::users::routes(&state))
        .nest("/teams", features::teams::routes(&state))
        .nest("/wrestlers", features::wrestlers::routes(&state))
        .nest("/competitions", features::competitions::routes(&state))
        .nest("/matches", features::matches::routes(&state))
        .nest("/matchacts", features::match_acts::routes(&state))
        .nest("/referees", features::referees::routes(&state))
        .nest("/favorites", features::favorites::routes(&state));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .nest("/api/v1", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use mongodb::bson::DateTime;
    use storage::{
        PoolSettings,
        models::{User, UserRole},
    };
    use tower::ServiceExt;

    /// The driver connects lazily, so these requests never reach MongoDB
    async fn state() -> AppState {
        let db = Database::new(
            "mongodb://127.0.0.1:27017",
            "lucha_canaria_router_test",
            &PoolSettings::default(),
        )
        .await
        .unwrap();

        AppState {
            db,
            jwt: JwtService::new("router-test", "lucha-canaria-api", "lucha-canaria-clients", 1),
            passwords: PasswordHasher::new(4),
        }
    }

    fn token(state: &AppState, role: UserRole, team_id: Option<&str>) -> String {
        let now = DateTime::now();
        let user = User {
            id: "u1".to_string(),
            email: "user@example.com".to_string(),
            name: "Test".to_string(),
            surname: "User".to_string(),
            role,
            associated_team_id: team_id.map(str::to_string),
            permissions: vec![],
            password_hash: String::new(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        state.jwt.issue(&user).unwrap()
    }

    fn json_request(
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: serde_json::Value,
    ) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn team_body() -> serde_json::Value {
        serde_json::json!({
            "name": "C.L. Rosario",
            "island": "FUERTEVENTURA",
            "venue": "Terrero de Puerto del Rosario",
            "divisionCategory": "SEGUNDA"
        })
    }

    #[tokio::test]
    async fn test_write_without_token_is_unauthorized() {
        let app = build_router(state().await);

        let response = app
            .oneshot(json_request("POST", "/api/v1/teams", None, team_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_garbage_token_is_unauthorized() {
        let app = build_router(state().await);

        let request = Request::builder()
            .uri("/api/v1/favorites")
            .header(header::AUTHORIZATION, "Bearer not.a.jwt")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_guest_cannot_create_team() {
        let state = state().await;
        let guest = token(&state, UserRole::Guest, None);
        let app = build_router(state);

        let response = app
            .oneshot(json_request("POST", "/api/v1/teams", Some(&guest), team_body()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_coach_cannot_edit_other_team() {
        let state = state().await;
        let coach = token(&state, UserRole::Coach, Some("t1"));
        let app = build_router(state);

        let response = app
            .oneshot(json_request(
                "PUT",
                "/api/v1/teams/t2",
                Some(&coach),
                serde_json::json!({ "venue": "Otro terrero" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_referee_cannot_manage_users() {
        let state = state().await;
        let referee = token(&state, UserRole::Referee, None);
        let app = build_router(state);

        let request = Request::builder()
            .uri("/api/v1/users")
            .header(header::AUTHORIZATION, format!("Bearer {referee}"))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_register_validates_before_storage() {
        let app = build_router(state().await);

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/auth/register",
                None,
                serde_json::json!({
                    "email": "not-an-email",
                    "password": "short",
                    "name": "Pedro",
                    "surname": "Díaz"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_oversized_page_is_rejected() {
        let app = build_router(state().await);

        let request = Request::builder()
            .uri("/api/v1/wrestlers?size=500")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let app = build_router(state().await);

        let request = Request::builder()
            .uri("/api-docs/openapi.json")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
