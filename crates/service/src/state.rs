use std::sync::Arc;

use super::config::Config;
use super::database::{Database, DatabaseSetupError};
use super::session::{MemorySessionStore, SessionStore};

/// Main service state - database plus handshake session store
#[derive(Clone)]
pub struct State {
    database: Database,
    sessions: Arc<dyn SessionStore>,
}

impl State {
    pub async fn from_config(config: &Config) -> Result<Self, StateSetupError> {
        let database = Database::connect(config.sqlite_path.as_deref()).await?;
        match &config.sqlite_path {
            Some(path) => tracing::info!(path = %path.display(), "database ready"),
            None => tracing::info!("using in-memory database"),
        }

        let sessions: Arc<dyn SessionStore> =
            Arc::new(MemorySessionStore::new(config.session_ttl));

        Ok(Self { database, sessions })
    }

    /// Build state over an existing database and session store; used by
    /// tests to inject alternate backings.
    pub fn new(database: Database, sessions: Arc<dyn SessionStore>) -> Self {
        Self { database, sessions }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn sessions(&self) -> &dyn SessionStore {
        self.sessions.as_ref()
    }
}

impl AsRef<Database> for State {
    fn as_ref(&self) -> &Database {
        &self.database
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateSetupError {
    #[error("database setup error: {0}")]
    DatabaseSetupError(#[from] DatabaseSetupError),
}
