use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;

use common::protocol::{HandshakeQuery, HandshakeResponse};

use crate::session::SessionStoreError;
use crate::ServiceState;

use super::error_response;

/// Step 1 of the handshake: the client presents a `site_id`, the server
/// answers with a fresh session id and the site's secret fingerprint as
/// the challenge. The fingerprint is one-way; any caller presenting a
/// known site_id receives it.
pub async fn handler(
    State(state): State<ServiceState>,
    query: Result<Query<HandshakeQuery>, QueryRejection>,
) -> Result<impl IntoResponse, HandshakeError> {
    let Query(query) =
        query.map_err(|_| HandshakeError::InvalidRequest("site_id required".into()))?;
    if query.site_id.is_empty() {
        return Err(HandshakeError::InvalidRequest("site_id required".into()));
    }

    let site = state
        .database()
        .get_site(&query.site_id)
        .await?
        .ok_or(HandshakeError::SiteNotFound)?;

    // Opportunistic sweep: sessions are cheap and bounded by handshake rate
    let swept = state.sessions().sweep_expired().await?;
    if swept > 0 {
        tracing::debug!(swept, "swept expired handshake sessions");
    }

    let session = state
        .sessions()
        .create(&site.id, &site.secret_key_hash)
        .await?;

    tracing::info!(site_id = %site.id, session_id = %session.id, "handshake initiated");

    Ok((
        StatusCode::OK,
        Json(HandshakeResponse {
            session_id: session.id,
            challenge: site.secret_key_hash,
        }),
    ))
}

#[derive(Debug, thiserror::Error)]
pub enum HandshakeError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("site not found")]
    SiteNotFound,
    #[error("session store error: {0}")]
    Sessions(#[from] SessionStoreError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for HandshakeError {
    fn into_response(self) -> Response {
        match self {
            HandshakeError::InvalidRequest(msg) => error_response(StatusCode::BAD_REQUEST, msg),
            HandshakeError::SiteNotFound => {
                error_response(StatusCode::NOT_FOUND, "Site not found")
            }
            HandshakeError::Sessions(e) => {
                tracing::error!("handshake session error: {}", e);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            HandshakeError::Database(e) => {
                tracing::error!("handshake database error: {}", e);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}
