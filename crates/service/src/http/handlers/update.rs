use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;

use common::protocol::{UpdateRequest, UpdateResponse, STATUS_SUCCESS};

use crate::database::UpdateRecord;
use crate::ServiceState;

use super::error_response;

/// Fully replace an existing record's ciphertext/iv/epoch. Ownership is
/// enforced by the `(id, site_id)` pair; an id belonging to another site
/// is indistinguishable from a missing one.
pub async fn handler(
    State(state): State<ServiceState>,
    payload: Result<Json<UpdateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, UpdateError> {
    let Json(req) =
        payload.map_err(|_| UpdateError::InvalidRequest("Missing required fields".into()))?;
    if req.site_id.is_empty()
        || req.encrypted_info.is_empty()
        || req.iv.is_empty()
        || req.enc.is_empty()
    {
        return Err(UpdateError::InvalidRequest(
            "Missing required fields".into(),
        ));
    }

    state
        .database()
        .get_site(&req.site_id)
        .await?
        .ok_or(UpdateError::SiteNotFound)?;

    let updated = state
        .database()
        .update_record(UpdateRecord {
            id: req.paste_id,
            site_id: &req.site_id,
            encrypted_data: &req.encrypted_info,
            iv: &req.iv,
            epoch: req.time,
        })
        .await?;

    if !updated {
        return Err(UpdateError::RecordNotFound(req.paste_id));
    }

    tracing::info!(site_id = %req.site_id, id = req.paste_id, "updated record");

    Ok((
        StatusCode::OK,
        Json(UpdateResponse {
            status: STATUS_SUCCESS.to_string(),
            id: req.paste_id,
        }),
    ))
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("site not found")]
    SiteNotFound,
    #[error("record not found: {0}")]
    RecordNotFound(i64),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for UpdateError {
    fn into_response(self) -> Response {
        match self {
            UpdateError::InvalidRequest(msg) => error_response(StatusCode::BAD_REQUEST, msg),
            UpdateError::SiteNotFound => error_response(StatusCode::NOT_FOUND, "Site not found"),
            UpdateError::RecordNotFound(_) => error_response(
                StatusCode::NOT_FOUND,
                "Paste not found or does not belong to this site",
            ),
            UpdateError::Database(e) => {
                tracing::error!("update database error: {}", e);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to update data")
            }
        }
    }
}
