//! Short-lived handshake session store.
//!
//! Sessions are write-once, read-until-expiry: a handshake initiation
//! creates one, the verify step reads it, and the TTL retires it. The
//! backing store is injectable so the handlers never depend on a specific
//! implementation; production uses the in-memory map.

mod memory;

pub use memory::MemorySessionStore;

use std::time::Instant;

use async_trait::async_trait;

/// One in-flight handshake attempt
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque server-generated id, unique per handshake attempt
    pub id: String,
    pub site_id: String,
    /// Copied from the site at creation; the verify step compares the
    /// submitted proof against this byte-for-byte
    pub secret_key_hash: String,
    pub created_at: Instant,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("session store backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Create a session for a new handshake attempt. Ids must be
    /// collision-resistant under concurrent handshakes for the same site.
    async fn create(
        &self,
        site_id: &str,
        secret_key_hash: &str,
    ) -> Result<Session, SessionStoreError>;

    /// Look up a live session. A session older than the TTL is reported
    /// as missing even if the sweep has not removed it yet.
    async fn get(&self, session_id: &str) -> Result<Option<Session>, SessionStoreError>;

    /// Remove every expired session, returning how many were dropped.
    /// Advisory; invoked opportunistically on each new handshake.
    async fn sweep_expired(&self) -> Result<usize, SessionStoreError>;
}
