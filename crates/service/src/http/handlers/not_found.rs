use axum::response::Response;
use http::StatusCode;

use super::error_response;

pub async fn handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}
