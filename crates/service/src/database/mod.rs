//! SQLite-backed site and record store.
//!
//! The database holds two tables: `sites` (identity fingerprints) and
//! `pastes` (opaque ciphertext records). Queries live in impl blocks on
//! [`Database`], split by table.

mod records;
mod sites;

pub use records::{NewRecord, Record, UpdateRecord};
pub use sites::{Site, SiteStoreError};

use std::ops::Deref;
use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Shared connection pool over the record store
#[derive(Debug, Clone)]
pub struct Database(SqlitePool);

impl Deref for Database {
    type Target = SqlitePool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Database {
    /// Connect to the SQLite database at `path`, creating it if missing,
    /// and run migrations. With no path an in-memory database is used.
    pub async fn connect(path: Option<&Path>) -> Result<Self, DatabaseSetupError> {
        let pool = match path {
            Some(path) => {
                let options = SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true);
                SqlitePoolOptions::new()
                    .max_connections(16)
                    .connect_with(options)
                    .await?
            }
            None => {
                // An in-memory database lives inside a single connection.
                // Keep exactly one and never let the pool reap it.
                let options = SqliteConnectOptions::new().in_memory(true);
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect_with(options)
                    .await?
            }
        };

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self(pool))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DatabaseSetupError {
    #[error("failed to connect to database: {0}")]
    Connect(#[from] sqlx::Error),
    #[error("failed to run migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}
