//! End-to-end tests: a real server on an ephemeral port, driven through
//! the client facade.

use std::time::Duration;

use serde_json::json;

use client::{ApiClient, ApiError, ClientError, SiteClient};
use common::crypto::{epoch_now, generate_proof, sha256_hex};
use common::protocol::{HandshakeQuery, RecordEntry, RetrieveQuery, VerifyRequest};

/// Bind the service router on an ephemeral port with an in-memory
/// database; returns the base URL.
async fn spawn_server() -> String {
    let config = service::Config {
        listen_addr: None,
        sqlite_path: None,
        session_ttl: Duration::from_secs(300),
        log_level: tracing::Level::INFO,
    };
    let state = service::ServiceState::from_config(&config).await.unwrap();
    let app = service::http::router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// Fetch a site's records without decrypting, for asserting on wire
/// fields like the iv.
async fn raw_entries(
    remote: &str,
    site_id: &str,
    secret: &str,
    loc: Option<&str>,
) -> Vec<RecordEntry> {
    let api = ApiClient::new(remote).unwrap();
    let epoch = epoch_now();
    let response = api
        .call(RetrieveQuery {
            site_id: site_id.to_string(),
            enc: generate_proof(secret, epoch),
            epo: epoch,
            loc: loc.map(str::to_string),
        })
        .await
        .unwrap();
    response.data
}

fn assert_status(err: ClientError, expected: u16) {
    match err {
        ClientError::Api(ApiError::Status { status, .. }) => {
            assert_eq!(status.as_u16(), expected)
        }
        other => panic!("expected status {expected}, got {other:?}"),
    }
}

#[tokio::test]
async fn test_store_retrieve_update_delete_lifecycle() {
    let remote = spawn_server().await;
    let site = SiteClient::new(&remote, "siteA", "s3cr3t").unwrap();
    site.register().await.unwrap();

    let id = site.store("home", &json!({"x": 1})).await.unwrap();

    let records = site.retrieve(Some("home")).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, id);
    assert_eq!(records[0].location, "home");
    assert_eq!(records[0].data, json!({"x": 1}));

    let before = raw_entries(&remote, "siteA", "s3cr3t", Some("home")).await;

    let updated_id = site.update(id, &json!({"x": 2})).await.unwrap();
    assert_eq!(updated_id, id);

    let records = site.retrieve(Some("home")).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, id);
    assert_eq!(records[0].data, json!({"x": 2}));

    // update fully replaces the payload, including a fresh iv
    let after = raw_entries(&remote, "siteA", "s3cr3t", Some("home")).await;
    assert_ne!(before[0].iv, after[0].iv);

    site.delete(id).await.unwrap();
    let records = site.retrieve(Some("home")).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let remote = spawn_server().await;
    let site = SiteClient::new(&remote, "siteA", "s3cr3t").unwrap();
    site.register().await.unwrap();

    let err = site.register().await.unwrap_err();
    assert_status(err, 409);

    // The original fingerprint is untouched; the site still works
    let id = site.store("home", &json!({"ok": true})).await.unwrap();
    assert!(id > 0);
}

#[tokio::test]
async fn test_wrong_secret_cannot_write_or_read() {
    let remote = spawn_server().await;
    let site = SiteClient::new(&remote, "siteA", "s3cr3t").unwrap();
    site.register().await.unwrap();
    site.store("home", &json!({"x": 1})).await.unwrap();

    let imposter = SiteClient::new(&remote, "siteA", "wrong").unwrap();

    // Store handshakes first; the challenge exposes the mismatch before
    // any ciphertext is sent
    let err = imposter.store("home", &json!({"x": 9})).await.unwrap_err();
    assert!(matches!(err, ClientError::SecretMismatch));

    // Retrieve does not handshake; the server returns ciphertext, but
    // every record fails to decrypt and is dropped
    let records = imposter.retrieve(None).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_unknown_site_is_not_found() {
    let remote = spawn_server().await;

    let ghost = SiteClient::new(&remote, "ghost", "whatever").unwrap();
    let err = ghost.retrieve(None).await.unwrap_err();
    assert_status(err, 404);

    let err = ghost.store("home", &json!({})).await.unwrap_err();
    assert_status(err, 404);
}

#[tokio::test]
async fn test_handshake_rejects_bad_proof_and_bad_session() {
    let remote = spawn_server().await;
    let site = SiteClient::new(&remote, "siteA", "s3cr3t").unwrap();
    site.register().await.unwrap();

    let api = ApiClient::new(&remote).unwrap();
    let handshake = api
        .call(HandshakeQuery {
            site_id: "siteA".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(handshake.challenge, sha256_hex("s3cr3t"));

    // Wrong proof for a valid session
    let err = api
        .call(VerifyRequest {
            session_id: handshake.session_id,
            proof: sha256_hex("wrong"),
        })
        .await
        .unwrap_err();
    match err {
        ApiError::Status { status, .. } => assert_eq!(status.as_u16(), 401),
        other => panic!("expected 401, got {other:?}"),
    }

    // Correct proof for a session that never existed
    let err = api
        .call(VerifyRequest {
            session_id: "no-such-session".to_string(),
            proof: sha256_hex("s3cr3t"),
        })
        .await
        .unwrap_err();
    match err {
        ApiError::Status { status, .. } => assert_eq!(status.as_u16(), 404),
        other => panic!("expected 404, got {other:?}"),
    }
}

#[tokio::test]
async fn test_sites_are_isolated() {
    let remote = spawn_server().await;
    let site_a = SiteClient::new(&remote, "siteA", "secret-a").unwrap();
    let site_b = SiteClient::new(&remote, "siteB", "secret-b").unwrap();
    site_a.register().await.unwrap();
    site_b.register().await.unwrap();

    site_a.store("home", &json!({"owner": "a"})).await.unwrap();
    let b_id = site_b.store("home", &json!({"owner": "b"})).await.unwrap();

    let records = site_b.retrieve(None).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, b_id);
    assert_eq!(records[0].data, json!({"owner": "b"}));

    // A site cannot delete another site's record
    let err = site_a.delete(b_id).await.unwrap_err();
    assert_status(err, 404);
}

#[tokio::test]
async fn test_retrieve_orders_newest_first() {
    let remote = spawn_server().await;
    let site = SiteClient::new(&remote, "siteA", "s3cr3t").unwrap();
    site.register().await.unwrap();

    let first = site.store("home", &json!({"n": 1})).await.unwrap();
    let second = site.store("home", &json!({"n": 2})).await.unwrap();

    let records = site.retrieve(Some("home")).await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, second);
    assert_eq!(records[1].id, first);
}
