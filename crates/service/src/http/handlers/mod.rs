//! One module per route. Each owns its handler, validation, and an error
//! enum mapping to a status code plus a structured JSON error body.

pub mod delete;
pub mod handshake;
pub mod not_found;
pub mod register;
pub mod retrieve;
pub mod store;
pub mod update;
pub mod verify;

use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;

use common::protocol::ErrorBody;

/// Render an error as `(status, {"error": message})`
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}
