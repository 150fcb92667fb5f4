use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use super::error;
use crate::auth::Principal;

/// The principal resolved by the auth guard, 404 when the route was excluded
/// and no user was resolved.
pub async fn me(principal: Option<Extension<Principal>>) -> Response {
    match principal {
        Some(Extension(principal)) => Json(principal).into_response(),
        None => error(StatusCode::NOT_FOUND, "Not found"),
    }
}
