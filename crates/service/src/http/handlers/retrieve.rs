use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;

use common::protocol::{RecordEntry, RetrieveQuery, RetrieveResponse, STATUS_SUCCESS};

use crate::database::Record;
use crate::ServiceState;

use super::error_response;

/// Return a site's records, optionally filtered by location, newest
/// first. The records go back still encrypted; decryption (and the
/// per-record drop of anything undecryptable) happens client-side under
/// each record's own stored epoch.
pub async fn handler(
    State(state): State<ServiceState>,
    query: Result<Query<RetrieveQuery>, QueryRejection>,
) -> Result<impl IntoResponse, RetrieveError> {
    let Query(query) =
        query.map_err(|_| RetrieveError::InvalidRequest("Missing required parameters".into()))?;
    if query.site_id.is_empty() || query.enc.is_empty() {
        return Err(RetrieveError::InvalidRequest(
            "Missing required parameters".into(),
        ));
    }

    state
        .database()
        .get_site(&query.site_id)
        .await?
        .ok_or(RetrieveError::SiteNotFound)?;

    let records = state
        .database()
        .list_records(&query.site_id, query.loc.as_deref())
        .await?;

    tracing::debug!(site_id = %query.site_id, count = records.len(), "retrieved records");

    Ok((
        StatusCode::OK,
        Json(RetrieveResponse {
            status: STATUS_SUCCESS.to_string(),
            data: records.into_iter().map(entry_from_record).collect(),
        }),
    ))
}

fn entry_from_record(record: Record) -> RecordEntry {
    RecordEntry {
        id: record.id,
        location: record.location,
        encrypted_data: record.encrypted_data,
        iv: record.iv,
        epoch: record.epoch,
        created_at: record.created_at,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RetrieveError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("site not found")]
    SiteNotFound,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for RetrieveError {
    fn into_response(self) -> Response {
        match self {
            RetrieveError::InvalidRequest(msg) => error_response(StatusCode::BAD_REQUEST, msg),
            RetrieveError::SiteNotFound => error_response(StatusCode::NOT_FOUND, "Site not found"),
            RetrieveError::Database(e) => {
                tracing::error!("retrieve database error: {}", e);
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to retrieve data",
                )
            }
        }
    }
}
