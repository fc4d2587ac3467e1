use serde::{Deserialize, Serialize};

/// Status string for a verified handshake
pub const STATUS_READY: &str = "ready";
/// Status string for a completed storage operation
pub const STATUS_SUCCESS: &str = "success";

/// Query parameters for `GET /handshake`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandshakeQuery {
    /// The site identity initiating the handshake
    pub site_id: String,
}

/// Response to a handshake initiation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandshakeResponse {
    /// Opaque server-generated session id, valid for one verify attempt
    /// until the session TTL expires
    pub session_id: String,
    /// The site's stored secret fingerprint. The client must compute
    /// `sha256_hex(secret)` independently and compare before answering.
    pub challenge: String,
}

/// Body for `POST /verify`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub session_id: String,
    /// Must equal the challenge byte-for-byte
    pub proof: String,
}

/// Response to a successful verify
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    /// Always [`STATUS_READY`] on success
    pub status: String,
    pub message: String,
}

/// Body for `POST /store`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreRequest {
    pub site_id: String,
    /// Epoch the payload was encrypted under (Unix seconds)
    pub time: i64,
    /// Hex AES-256-CBC ciphertext
    pub encrypted_info: String,
    /// Caller-chosen plaintext location tag, used for filtering
    pub loc: String,
    /// Hex initialization vector, unique per encryption
    pub iv: String,
    /// Authentication proof for `time`
    pub enc: String,
}

/// Response to a store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreResponse {
    pub status: String,
    /// Server-assigned record id
    pub id: i64,
}

/// Query parameters for `GET /retrieve`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrieveQuery {
    pub site_id: String,
    /// Authentication proof for `epo` (the current epoch, not any
    /// record's stored epoch)
    pub enc: String,
    pub epo: i64,
    /// Optional location filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loc: Option<String>,
}

/// One stored record as returned by retrieve, still encrypted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordEntry {
    pub id: i64,
    pub location: String,
    pub encrypted_data: String,
    pub iv: String,
    /// Epoch the record was encrypted under; required for decryption
    pub epoch: i64,
    pub created_at: String,
}

/// Response to a retrieve, newest records first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrieveResponse {
    pub status: String,
    pub data: Vec<RecordEntry>,
}

/// Body for `PUT /update`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRequest {
    pub site_id: String,
    pub paste_id: i64,
    pub time: i64,
    pub encrypted_info: String,
    pub iv: String,
    pub enc: String,
}

/// Response to an update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateResponse {
    pub status: String,
    pub id: i64,
}

/// Body for `DELETE /delete`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub site_id: String,
    pub paste_id: i64,
    pub enc: String,
    pub epo: i64,
}

/// Response to a delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub status: String,
}

/// Body for `POST /register`
///
/// The only operation that carries the secret itself; the server hashes
/// it immediately and persists only the fingerprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub site_id: String,
    pub secret_key: String,
}

/// Response to a registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub status: String,
    pub site_id: String,
}

/// Structured error body attached to every non-2xx response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_retrieve_query_omits_missing_loc() {
        let query = RetrieveQuery {
            site_id: "siteA".into(),
            enc: "aa".into(),
            epo: 1700000000,
            loc: None,
        };
        let json = serde_json::to_value(&query).unwrap();
        assert!(json.get("loc").is_none());
    }

    #[test]
    fn test_store_request_wire_names() {
        let req = StoreRequest {
            site_id: "siteA".into(),
            time: 1700000000,
            encrypted_info: "aabb".into(),
            loc: "home".into(),
            iv: "00".into(),
            enc: "ff".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        for key in ["site_id", "time", "encrypted_info", "loc", "iv", "enc"] {
            assert!(json.get(key).is_some(), "missing wire field {key}");
        }
    }
}
