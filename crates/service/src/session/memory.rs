use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use super::{Session, SessionStore, SessionStoreError};

/// In-memory session store over a locked map.
///
/// Process-wide transient state: nothing survives a restart, which is
/// fine because sessions only bridge the two handshake steps.
#[derive(Debug, Clone)]
pub struct MemorySessionStore {
    ttl: Duration,
    inner: Arc<RwLock<HashMap<String, Session>>>,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn is_expired(&self, session: &Session) -> bool {
        session.created_at.elapsed() > self.ttl
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(
        &self,
        site_id: &str,
        secret_key_hash: &str,
    ) -> Result<Session, SessionStoreError> {
        let session = Session {
            id: Uuid::new_v4().to_string(),
            site_id: site_id.to_string(),
            secret_key_hash: secret_key_hash.to_string(),
            created_at: Instant::now(),
        };

        self.inner
            .write()
            .insert(session.id.clone(), session.clone());

        Ok(session)
    }

    async fn get(&self, session_id: &str) -> Result<Option<Session>, SessionStoreError> {
        let inner = self.inner.read();
        Ok(inner
            .get(session_id)
            .filter(|session| !self.is_expired(session))
            .cloned())
    }

    async fn sweep_expired(&self) -> Result<usize, SessionStoreError> {
        let mut inner = self.inner.write();
        let before = inner.len();
        inner.retain(|_, session| session.created_at.elapsed() <= self.ttl);
        Ok(before - inner.len())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get() {
        let store = MemorySessionStore::new(Duration::from_secs(300));

        let session = store.create("siteA", "hash-a").await.unwrap();
        let found = store.get(&session.id).await.unwrap().unwrap();

        assert_eq!(found.site_id, "siteA");
        assert_eq!(found.secret_key_hash, "hash-a");
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_handshakes_get_distinct_sessions() {
        let store = MemorySessionStore::new(Duration::from_secs(300));

        let a = store.create("siteA", "hash-a").await.unwrap();
        let b = store.create("siteA", "hash-a").await.unwrap();

        assert_ne!(a.id, b.id);
        assert!(store.get(&a.id).await.unwrap().is_some());
        assert!(store.get(&b.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_expired_session_is_unusable_without_sweep() {
        let store = MemorySessionStore::new(Duration::ZERO);

        let session = store.create("siteA", "hash-a").await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        // Not swept, but get must still refuse it
        assert!(store.get(&session.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sweep_removes_only_expired() {
        let store = MemorySessionStore::new(Duration::from_millis(20));

        let old = store.create("siteA", "hash-a").await.unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;
        let fresh = store.create("siteA", "hash-a").await.unwrap();

        let swept = store.sweep_expired().await.unwrap();
        assert_eq!(swept, 1);
        assert!(store.get(&old.id).await.unwrap().is_none());
        assert!(store.get(&fresh.id).await.unwrap().is_some());
    }
}
