use anyhow::Context;
use storage::Database;

mod app;
mod auth;
mod config;
mod error;
mod features;
mod middleware;

use app::AppState;
use auth::{JwtService, PasswordHasher};
use config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting Lucha Canaria API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config.redacted_mongodb_uri()
    );
    let db = Database::new(&config.mongodb_uri, &config.database_name, &config.pool)
        .await
        .context("Failed to initialize database")?;

    tracing::info!("Ensuring database indexes");
    db.ensure_indexes()
        .await
        .context("Failed to create database indexes")?;
    tracing::info!("Database ready");

    let state = AppState {
        db,
        jwt: JwtService::new(
            &config.jwt_secret,
            &config.jwt_issuer,
            &config.jwt_audience,
            config.jwt_expiration_hours,
        ),
        passwords: PasswordHasher::new(config.bcrypt_cost),
    };
    let app = app::build_router(state);

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app).await?;

    Ok(())
}
