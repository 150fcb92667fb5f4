//! Per-request authentication guard.
//!
//! Paths covered by the exclusion list pass straight through. Anything else
//! needs credentials (`Authorization` header or session cookie), otherwise
//! 401, and a resolvable user, otherwise 403. The resolved [`Principal`] is
//! stored as a request extension for the handlers.
//!
//! [`Principal`]: crate::auth::Principal

use axum::{
    extract::{Extension, Request},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

use super::{handlers::error, AuthState};

pub async fn authenticate(
    Extension(state): Extension<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    if !state
        .auth
        .require_auth(Some(&path), Some(&state.excluded_paths))
    {
        return next.run(request).await;
    }

    let headers = Some(request.headers());

    if state.auth.authorization_header(headers).is_none()
        && state.auth.session_cookie(headers).is_none()
    {
        debug!(path = %path, "missing credentials");
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }

    let Some(principal) = state.auth.current_user(headers) else {
        debug!(path = %path, "credentials did not resolve to a user");
        return error(StatusCode::FORBIDDEN, "Forbidden");
    };

    request.extensions_mut().insert(principal);

    next.run(request).await
}
