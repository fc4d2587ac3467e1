use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;

use common::protocol::{StoreRequest, StoreResponse, STATUS_SUCCESS};

use crate::database::NewRecord;
use crate::ServiceState;

use super::error_response;

/// Persist a new encrypted record.
///
/// The proof (`enc`) cannot be cryptographically checked here: the server
/// never holds the secret. What is verified is that the site exists; the
/// ciphertext, iv, and epoch are stored opaquely for the owning client to
/// decrypt later.
pub async fn handler(
    State(state): State<ServiceState>,
    payload: Result<Json<StoreRequest>, JsonRejection>,
) -> Result<impl IntoResponse, StoreError> {
    let Json(req) =
        payload.map_err(|_| StoreError::InvalidRequest("Missing required fields".into()))?;
    if req.site_id.is_empty()
        || req.encrypted_info.is_empty()
        || req.loc.is_empty()
        || req.iv.is_empty()
        || req.enc.is_empty()
    {
        return Err(StoreError::InvalidRequest("Missing required fields".into()));
    }

    state
        .database()
        .get_site(&req.site_id)
        .await?
        .ok_or(StoreError::SiteNotFound)?;

    let id = state
        .database()
        .insert_record(NewRecord {
            site_id: &req.site_id,
            location: &req.loc,
            encrypted_data: &req.encrypted_info,
            iv: &req.iv,
            epoch: req.time,
        })
        .await?;

    tracing::info!(site_id = %req.site_id, id, location = %req.loc, "stored record");

    Ok((
        StatusCode::OK,
        Json(StoreResponse {
            status: STATUS_SUCCESS.to_string(),
            id,
        }),
    ))
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("site not found")]
    SiteNotFound,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        match self {
            StoreError::InvalidRequest(msg) => error_response(StatusCode::BAD_REQUEST, msg),
            StoreError::SiteNotFound => error_response(StatusCode::NOT_FOUND, "Site not found"),
            StoreError::Database(e) => {
                tracing::error!("store database error: {}", e);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to store data")
            }
        }
    }
}
