use super::Database;

/// One encrypted record as stored. The server never decrypts
/// `encrypted_data`; `epoch` is the binder the owning client needs to
/// re-derive the key.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Record {
    pub id: i64,
    pub site_id: String,
    pub location: String,
    pub encrypted_data: String,
    pub iv: String,
    pub epoch: i64,
    pub created_at: String,
}

/// Parameters for inserting a new record
#[derive(Debug, Clone)]
pub struct NewRecord<'a> {
    pub site_id: &'a str,
    pub location: &'a str,
    pub encrypted_data: &'a str,
    pub iv: &'a str,
    pub epoch: i64,
}

/// Parameters for fully replacing a record's payload
#[derive(Debug, Clone)]
pub struct UpdateRecord<'a> {
    pub id: i64,
    pub site_id: &'a str,
    pub encrypted_data: &'a str,
    pub iv: &'a str,
    pub epoch: i64,
}

impl Database {
    /// Insert a record and return its server-assigned id
    pub async fn insert_record(&self, params: NewRecord<'_>) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO pastes (site_id, location, encrypted_data, iv, epoch)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(params.site_id)
        .bind(params.location)
        .bind(params.encrypted_data)
        .bind(params.iv)
        .bind(params.epoch)
        .execute(&**self)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// List a site's records, optionally filtered by location,
    /// newest-first. Ties on the one-second timestamp granularity fall
    /// back to the monotonically issued id.
    pub async fn list_records(
        &self,
        site_id: &str,
        location: Option<&str>,
    ) -> Result<Vec<Record>, sqlx::Error> {
        match location {
            Some(location) => {
                sqlx::query_as::<_, Record>(
                    r#"
                    SELECT id, site_id, location, encrypted_data, iv, epoch, created_at
                    FROM pastes
                    WHERE site_id = ?1 AND location = ?2
                    ORDER BY created_at DESC, id DESC
                    "#,
                )
                .bind(site_id)
                .bind(location)
                .fetch_all(&**self)
                .await
            }
            None => {
                sqlx::query_as::<_, Record>(
                    r#"
                    SELECT id, site_id, location, encrypted_data, iv, epoch, created_at
                    FROM pastes
                    WHERE site_id = ?1
                    ORDER BY created_at DESC, id DESC
                    "#,
                )
                .bind(site_id)
                .fetch_all(&**self)
                .await
            }
        }
    }

    /// Replace a record's ciphertext/iv/epoch. Returns false when no
    /// record with that id belongs to the site.
    pub async fn update_record(&self, params: UpdateRecord<'_>) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE pastes
            SET encrypted_data = ?1, iv = ?2, epoch = ?3
            WHERE id = ?4 AND site_id = ?5
            "#,
        )
        .bind(params.encrypted_data)
        .bind(params.iv)
        .bind(params.epoch)
        .bind(params.id)
        .bind(params.site_id)
        .execute(&**self)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a record owned by the site. Returns false when no record
    /// with that id belongs to the site.
    pub async fn delete_record(&self, id: i64, site_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pastes WHERE id = ?1 AND site_id = ?2")
            .bind(id)
            .bind(site_id)
            .execute(&**self)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    async fn setup() -> Database {
        let db = Database::connect(None).await.unwrap();
        db.create_site("siteA", "hash-a").await.unwrap();
        db.create_site("siteB", "hash-b").await.unwrap();
        db
    }

    fn new_record<'a>(site_id: &'a str, location: &'a str, data: &'a str) -> NewRecord<'a> {
        NewRecord {
            site_id,
            location,
            encrypted_data: data,
            iv: "00112233445566778899aabbccddeeff",
            epoch: 1700000000,
        }
    }

    #[tokio::test]
    async fn test_insert_and_list_filters_by_site_and_location() {
        let db = setup().await;

        db.insert_record(new_record("siteA", "home", "ct-1")).await.unwrap();
        db.insert_record(new_record("siteA", "work", "ct-2")).await.unwrap();
        db.insert_record(new_record("siteB", "home", "ct-3")).await.unwrap();

        let home = db.list_records("siteA", Some("home")).await.unwrap();
        assert_eq!(home.len(), 1);
        assert_eq!(home[0].encrypted_data, "ct-1");

        let all = db.list_records("siteA", None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|r| r.site_id == "siteA"));
    }

    #[tokio::test]
    async fn test_list_orders_newest_first() {
        let db = setup().await;

        let first = db.insert_record(new_record("siteA", "home", "ct-1")).await.unwrap();
        let second = db.insert_record(new_record("siteA", "home", "ct-2")).await.unwrap();
        assert!(second > first);

        let records = db.list_records("siteA", Some("home")).await.unwrap();
        assert_eq!(records[0].id, second);
        assert_eq!(records[1].id, first);
    }

    #[tokio::test]
    async fn test_update_replaces_payload_and_checks_ownership() {
        let db = setup().await;
        let id = db.insert_record(new_record("siteA", "home", "ct-1")).await.unwrap();

        let updated = db
            .update_record(UpdateRecord {
                id,
                site_id: "siteA",
                encrypted_data: "ct-2",
                iv: "ffeeddccbbaa99887766554433221100",
                epoch: 1700000001,
            })
            .await
            .unwrap();
        assert!(updated);

        let records = db.list_records("siteA", Some("home")).await.unwrap();
        assert_eq!(records[0].encrypted_data, "ct-2");
        assert_eq!(records[0].epoch, 1700000001);

        // Wrong owner touches nothing
        let updated = db
            .update_record(UpdateRecord {
                id,
                site_id: "siteB",
                encrypted_data: "ct-3",
                iv: "00",
                epoch: 1,
            })
            .await
            .unwrap();
        assert!(!updated);
    }

    #[tokio::test]
    async fn test_delete_checks_ownership() {
        let db = setup().await;
        let id = db.insert_record(new_record("siteA", "home", "ct-1")).await.unwrap();

        assert!(!db.delete_record(id, "siteB").await.unwrap());
        assert!(db.delete_record(id, "siteA").await.unwrap());
        assert!(!db.delete_record(id, "siteA").await.unwrap());

        let records = db.list_records("siteA", Some("home")).await.unwrap();
        assert!(records.is_empty());
    }
}
