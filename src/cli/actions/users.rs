use crate::db;
use anyhow::Result;
use tracing::{debug, instrument};

#[derive(Debug)]
pub struct Args {
    pub database: db::Options,
}

/// Execute the users action.
/// # Errors
/// Returns an error if the database cannot be reached or queried.
#[instrument(skip_all)]
pub async fn execute(args: Args) -> Result<()> {
    let pool = db::connect(&args.database).await?;

    let count = db::dump_users(&pool).await?;

    debug!(count, "users logged");

    pool.close().await;

    Ok(())
}
