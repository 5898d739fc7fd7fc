use serde::Serialize;
use storage::Database;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `UP` or `DOWN`
    pub status: &'static str,
    /// `UP` when MongoDB answers a ping
    pub database: &'static str,
    pub version: &'static str,
}

impl HealthResponse {
    pub fn is_up(&self) -> bool {
        self.status == "UP"
    }
}

pub async fn check(db: &Database) -> HealthResponse {
    let database_up = match db.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Database health check failed: {}", e);
            false
        }
    };
    let status = if database_up { "UP" } else { "DOWN" };

    HealthResponse {
        status,
        database: status,
        version: env!("CARGO_PKG_VERSION"),
    }
}
