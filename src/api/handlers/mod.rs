pub mod status;
pub use self::status::status;

pub mod users;
pub use self::users::me;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

/// JSON `{"error": ...}` body with the given status.
pub fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

pub async fn unauthorized() -> Response {
    error(StatusCode::UNAUTHORIZED, "Unauthorized")
}

pub async fn forbidden() -> Response {
    error(StatusCode::FORBIDDEN, "Forbidden")
}
