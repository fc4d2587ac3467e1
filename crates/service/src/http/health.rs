use axum::response::{IntoResponse, Response};
use axum::{routing, Json, Router};
use http::StatusCode;

use crate::ServiceState;

pub fn router() -> Router<ServiceState> {
    Router::new().route("/healthz", routing::get(handler))
}

#[tracing::instrument]
pub async fn handler() -> Response {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" }))).into_response()
}
