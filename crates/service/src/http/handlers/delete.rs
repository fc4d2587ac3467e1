use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;

use common::protocol::{DeleteRequest, DeleteResponse, STATUS_SUCCESS};

use crate::ServiceState;

use super::error_response;

/// Remove a record owned by the site. No handshake precedes this call;
/// the per-call proof for the current epoch is the only authentication,
/// and it is not bound to the record's stored epoch.
pub async fn handler(
    State(state): State<ServiceState>,
    payload: Result<Json<DeleteRequest>, JsonRejection>,
) -> Result<impl IntoResponse, DeleteError> {
    let Json(req) =
        payload.map_err(|_| DeleteError::InvalidRequest("Missing required fields".into()))?;
    if req.site_id.is_empty() || req.enc.is_empty() {
        return Err(DeleteError::InvalidRequest(
            "Missing required fields".into(),
        ));
    }

    state
        .database()
        .get_site(&req.site_id)
        .await?
        .ok_or(DeleteError::SiteNotFound)?;

    let deleted = state
        .database()
        .delete_record(req.paste_id, &req.site_id)
        .await?;

    if !deleted {
        return Err(DeleteError::RecordNotFound(req.paste_id));
    }

    tracing::info!(site_id = %req.site_id, id = req.paste_id, "deleted record");

    Ok((
        StatusCode::OK,
        Json(DeleteResponse {
            status: STATUS_SUCCESS.to_string(),
        }),
    ))
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("site not found")]
    SiteNotFound,
    #[error("record not found: {0}")]
    RecordNotFound(i64),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for DeleteError {
    fn into_response(self) -> Response {
        match self {
            DeleteError::InvalidRequest(msg) => error_response(StatusCode::BAD_REQUEST, msg),
            DeleteError::SiteNotFound => error_response(StatusCode::NOT_FOUND, "Site not found"),
            DeleteError::RecordNotFound(_) => error_response(
                StatusCode::NOT_FOUND,
                "Paste not found or does not belong to this site",
            ),
            DeleteError::Database(e) => {
                tracing::error!("delete database error: {}", e);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete data")
            }
        }
    }
}
