use crate::{
    api::{self, AuthState},
    auth::AuthKind,
};
use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub auth_kind: AuthKind,
    pub session_name: String,
    pub excluded_paths: Vec<String>,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    debug!(
        auth_type = %args.auth_kind,
        excluded_paths = ?args.excluded_paths,
        "starting server"
    );

    let state = Arc::new(AuthState::new(
        args.auth_kind.build(&args.session_name),
        args.excluded_paths,
    ));

    api::new(args.port, state).await
}
