use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;

use common::crypto::sha256_hex;
use common::protocol::{RegisterRequest, RegisterResponse, STATUS_SUCCESS};

use crate::database::SiteStoreError;
use crate::ServiceState;

use super::error_response;

/// One-shot registration. The only request that ever carries the secret;
/// it is hashed immediately and only the fingerprint is persisted.
pub async fn handler(
    State(state): State<ServiceState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, RegisterError> {
    let Json(req) = payload
        .map_err(|_| RegisterError::InvalidRequest("site_id and secret_key required".into()))?;
    if req.site_id.is_empty() || req.secret_key.is_empty() {
        return Err(RegisterError::InvalidRequest(
            "site_id and secret_key required".into(),
        ));
    }

    let secret_key_hash = sha256_hex(&req.secret_key);
    state
        .database()
        .create_site(&req.site_id, &secret_key_hash)
        .await?;

    tracing::info!(site_id = %req.site_id, "registered site");

    Ok((
        StatusCode::OK,
        Json(RegisterResponse {
            status: STATUS_SUCCESS.to_string(),
            site_id: req.site_id,
        }),
    ))
}

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("site store error: {0}")]
    SiteStore(#[from] SiteStoreError),
}

impl IntoResponse for RegisterError {
    fn into_response(self) -> Response {
        match self {
            RegisterError::InvalidRequest(msg) => error_response(StatusCode::BAD_REQUEST, msg),
            RegisterError::SiteStore(SiteStoreError::AlreadyExists) => {
                error_response(StatusCode::CONFLICT, "Site ID already exists")
            }
            RegisterError::SiteStore(e) => {
                tracing::error!("register database error: {}", e);
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to register site",
                )
            }
        }
    }
}
