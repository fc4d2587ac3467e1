use super::Database;

/// A registered site identity
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Site {
    pub id: String,
    /// SHA-256 hex fingerprint of the site's shared secret
    pub secret_key_hash: String,
    pub created_at: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SiteStoreError {
    /// Registration hit the uniqueness constraint on `sites.id`
    #[error("site id already exists")]
    AlreadyExists,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Database {
    /// Register a new site. Fails with [`SiteStoreError::AlreadyExists`]
    /// on an id conflict; the original fingerprint is left untouched.
    pub async fn create_site(
        &self,
        site_id: &str,
        secret_key_hash: &str,
    ) -> Result<(), SiteStoreError> {
        sqlx::query("INSERT INTO sites (id, secret_key_hash) VALUES (?1, ?2)")
            .bind(site_id)
            .bind(secret_key_hash)
            .execute(&**self)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                    SiteStoreError::AlreadyExists
                }
                _ => SiteStoreError::Database(e),
            })?;

        Ok(())
    }

    /// Look up a site by id
    pub async fn get_site(&self, site_id: &str) -> Result<Option<Site>, sqlx::Error> {
        sqlx::query_as::<_, Site>(
            "SELECT id, secret_key_hash, created_at FROM sites WHERE id = ?1",
        )
        .bind(site_id)
        .fetch_optional(&**self)
        .await
    }
}
