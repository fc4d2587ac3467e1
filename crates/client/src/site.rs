use serde_json::Value;

use common::crypto::{decrypt, encrypt, epoch_now, generate_proof, sha256_hex, CryptoError};
use common::protocol::{
    DeleteRequest, HandshakeQuery, RegisterRequest, RetrieveQuery, StoreRequest, UpdateRequest,
    VerifyRequest, STATUS_READY,
};

use crate::api::{ApiClient, ApiError};

/// One retrieved record after client-side decryption
#[derive(Debug, Clone)]
pub struct DecryptedRecord {
    pub id: i64,
    pub location: String,
    pub data: Value,
    pub epoch: i64,
    pub created_at: String,
}

/// A caller's handle on one site identity.
///
/// Store and update perform a full handshake first as a liveness and
/// identity check before any ciphertext is transmitted; retrieve and
/// delete rely solely on the per-call proof. That asymmetry is part of
/// the protocol's external contract and is preserved here.
#[derive(Debug, Clone)]
pub struct SiteClient {
    api: ApiClient,
    site_id: String,
    secret: String,
}

impl SiteClient {
    pub fn new(
        remote: &str,
        site_id: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            api: ApiClient::new(remote)?,
            site_id: site_id.into(),
            secret: secret.into(),
        })
    }

    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    /// Register this site with the server. One-shot; the secret crosses
    /// the wire exactly once, and the server keeps only its fingerprint.
    pub async fn register(&self) -> Result<(), ClientError> {
        self.api
            .call(RegisterRequest {
                site_id: self.site_id.clone(),
                secret_key: self.secret.clone(),
            })
            .await?;
        Ok(())
    }

    /// Two-step handshake: fetch the challenge, confirm it matches our
    /// own fingerprint of the secret, and submit that value as the proof.
    pub async fn handshake(&self) -> Result<(), ClientError> {
        let response = self
            .api
            .call(HandshakeQuery {
                site_id: self.site_id.clone(),
            })
            .await?;

        let our_hash = sha256_hex(&self.secret);
        if our_hash != response.challenge {
            return Err(ClientError::SecretMismatch);
        }

        let verify = self
            .api
            .call(VerifyRequest {
                session_id: response.session_id,
                proof: our_hash,
            })
            .await?;

        if verify.status != STATUS_READY {
            return Err(ClientError::HandshakeFailed(verify.status));
        }

        Ok(())
    }

    /// Encrypt `data` under a fresh epoch and store it at `location`.
    /// Returns the server-assigned record id.
    pub async fn store(&self, location: &str, data: &Value) -> Result<i64, ClientError> {
        self.handshake().await?;

        let epoch = epoch_now();
        let payload = encrypt(data, &self.secret, epoch)?;

        let response = self
            .api
            .call(StoreRequest {
                site_id: self.site_id.clone(),
                time: epoch,
                encrypted_info: payload.ciphertext,
                loc: location.to_string(),
                iv: payload.iv,
                enc: generate_proof(&self.secret, epoch),
            })
            .await?;

        Ok(response.id)
    }

    /// Fetch and decrypt this site's records, optionally filtered by
    /// location, newest first.
    ///
    /// Each record is decrypted under its own stored epoch. A record that
    /// fails to decrypt (stored under a different secret, or corrupted)
    /// is dropped from the result set rather than failing the call.
    pub async fn retrieve(
        &self,
        location: Option<&str>,
    ) -> Result<Vec<DecryptedRecord>, ClientError> {
        let epoch = epoch_now();
        let response = self
            .api
            .call(RetrieveQuery {
                site_id: self.site_id.clone(),
                enc: generate_proof(&self.secret, epoch),
                epo: epoch,
                loc: location.map(str::to_string),
            })
            .await?;

        let mut records = Vec::with_capacity(response.data.len());
        for entry in response.data {
            match decrypt(&entry.encrypted_data, &entry.iv, &self.secret, entry.epoch) {
                Ok(data) => records.push(DecryptedRecord {
                    id: entry.id,
                    location: entry.location,
                    data,
                    epoch: entry.epoch,
                    created_at: entry.created_at,
                }),
                Err(_) => {
                    tracing::warn!(id = entry.id, "failed to decrypt record, skipping");
                }
            }
        }

        Ok(records)
    }

    /// Re-encrypt `data` under a fresh epoch and fully replace the record
    /// with the given id.
    pub async fn update(&self, id: i64, data: &Value) -> Result<i64, ClientError> {
        self.handshake().await?;

        let epoch = epoch_now();
        let payload = encrypt(data, &self.secret, epoch)?;

        let response = self
            .api
            .call(UpdateRequest {
                site_id: self.site_id.clone(),
                paste_id: id,
                time: epoch,
                encrypted_info: payload.ciphertext,
                iv: payload.iv,
                enc: generate_proof(&self.secret, epoch),
            })
            .await?;

        Ok(response.id)
    }

    /// Delete the record with the given id.
    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        let epoch = epoch_now();
        self.api
            .call(DeleteRequest {
                site_id: self.site_id.clone(),
                paste_id: id,
                enc: generate_proof(&self.secret, epoch),
                epo: epoch,
            })
            .await?;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("api error: {0}")]
    Api(#[from] ApiError),
    #[error("secret key mismatch: server challenge does not match our fingerprint")]
    SecretMismatch,
    #[error("handshake verification failed: server answered '{0}'")]
    HandshakeFailed(String),
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}
