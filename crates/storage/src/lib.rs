use std::time::Duration;

use mongodb::{
    Client, IndexModel,
    bson::doc,
    options::{ClientOptions, IndexOptions},
};

pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

use error::Result;

/// Connection pool settings for the MongoDB client
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub min_pool_size: u32,
    pub max_pool_size: u32,
    pub connect_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            min_pool_size: 5,
            max_pool_size: 50,
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Shared handle to the federation database.
///
/// Cloning is cheap: the driver client is reference counted and owns the
/// connection pool.
#[derive(Clone, Debug)]
pub struct Database {
    client: Client,
    db: mongodb::Database,
}

impl Database {
    /// Build the client and select the database. The driver connects lazily,
    /// so this only fails on a malformed URI or invalid options.
    pub async fn new(uri: &str, database_name: &str, pool: &PoolSettings) -> Result<Self> {
        let mut options = ClientOptions::parse(uri).await?;
        options.app_name = Some("lucha-canaria-api".to_string());
        options.min_pool_size = Some(pool.min_pool_size);
        options.max_pool_size = Some(pool.max_pool_size);
        options.connect_timeout = Some(pool.connect_timeout);
        options.server_selection_timeout = Some(pool.connect_timeout);

        let client = Client::with_options(options)?;
        let db = client.database(database_name);

        Ok(Self { client, db })
    }

    /// Underlying driver database, handed to repositories
    pub fn mongo(&self) -> &mongodb::Database {
        &self.db
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub async fn ping(&self) -> Result<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    /// Create the unique and lookup indexes the repositories rely on.
    /// Safe to run on every start.
    pub async fn ensure_indexes(&self) -> Result<()> {
        let unique = || IndexOptions::builder().unique(true).build();

        let specs = [
            (repository::user::COLLECTION, doc! { "email": 1 }, Some(unique())),
            (repository::wrestler::COLLECTION, doc! { "licenseNumber": 1 }, Some(unique())),
            (repository::wrestler::COLLECTION, doc! { "teamId": 1, "isActive": 1 }, None),
            (repository::team::COLLECTION, doc! { "name": 1 }, None),
            (repository::referee::COLLECTION, doc! { "licenseNumber": 1 }, Some(unique())),
            (repository::competition::COLLECTION, doc! { "season": -1 }, None),
            (repository::matches::COLLECTION, doc! { "competitionId": 1, "round": 1 }, None),
            (repository::match_act::COLLECTION, doc! { "matchId": 1 }, Some(unique())),
            (
                repository::favorite::COLLECTION,
                doc! { "userId": 1, "entityId": 1, "entityType": 1 },
                Some(unique()),
            ),
        ];

        for (collection, keys, options) in specs {
            let model = IndexModel::builder().keys(keys).options(options).build();
            self.db
                .collection::<mongodb::bson::Document>(collection)
                .create_index(model)
                .await?;
            tracing::debug!("Index ensured on {}", collection);
        }

        Ok(())
    }
}
