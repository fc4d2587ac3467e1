use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;

use common::protocol::{VerifyRequest, VerifyResponse, STATUS_READY};

use crate::session::SessionStoreError;
use crate::ServiceState;

use super::error_response;

/// Step 2 of the handshake: the client answers the challenge with its own
/// `sha256(secret)` as the proof. The comparison is byte-for-byte against
/// the hash copied into the session at creation. The session is left in
/// place on success; only the TTL retires it.
pub async fn handler(
    State(state): State<ServiceState>,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<impl IntoResponse, VerifyError> {
    let Json(req) = payload
        .map_err(|_| VerifyError::InvalidRequest("session_id and proof required".into()))?;
    if req.session_id.is_empty() || req.proof.is_empty() {
        return Err(VerifyError::InvalidRequest(
            "session_id and proof required".into(),
        ));
    }

    let session = state
        .sessions()
        .get(&req.session_id)
        .await?
        .ok_or(VerifyError::SessionNotFound)?;

    if req.proof != session.secret_key_hash {
        tracing::warn!(site_id = %session.site_id, "handshake proof mismatch");
        return Err(VerifyError::AuthenticationFailed);
    }

    tracing::info!(site_id = %session.site_id, session_id = %session.id, "handshake verified");

    Ok((
        StatusCode::OK,
        Json(VerifyResponse {
            status: STATUS_READY.to_string(),
            message: "Ready to receive data".to_string(),
        }),
    ))
}

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("invalid or expired session")]
    SessionNotFound,
    #[error("authentication failed")]
    AuthenticationFailed,
    #[error("session store error: {0}")]
    Sessions(#[from] SessionStoreError),
}

impl IntoResponse for VerifyError {
    fn into_response(self) -> Response {
        match self {
            VerifyError::InvalidRequest(msg) => error_response(StatusCode::BAD_REQUEST, msg),
            VerifyError::SessionNotFound => {
                error_response(StatusCode::NOT_FOUND, "Invalid or expired session")
            }
            VerifyError::AuthenticationFailed => {
                error_response(StatusCode::UNAUTHORIZED, "Authentication failed")
            }
            VerifyError::Sessions(e) => {
                tracing::error!("verify session error: {}", e);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}
