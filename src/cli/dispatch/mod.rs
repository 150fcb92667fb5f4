//! Map parsed command-line arguments to an [`Action`].

use crate::cli::{
    actions::{server, users, Action},
    commands::{self, auth, database},
};
use anyhow::Result;

fn server_action(sub_m: &clap::ArgMatches) -> Result<Action> {
    let port = sub_m.get_one::<u16>("port").copied().unwrap_or(8080);
    let auth = auth::Options::parse(sub_m)?;

    Ok(Action::Server(server::Args {
        port,
        auth_kind: auth.kind,
        session_name: auth.session_name,
        excluded_paths: auth.excluded_paths,
    }))
}

/// Map validated CLI matches to an action.
///
/// Without a subcommand the server runs with its env/default arguments.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some((commands::CMD_USERS, sub_m)) => Ok(Action::Users(users::Args {
            database: database::parse(sub_m)?,
        })),
        Some((_, sub_m)) => server_action(sub_m),
        None => {
            let sub_m = commands::server().try_get_matches_from([commands::CMD_SERVER])?;
            server_action(&sub_m)
        }
    }
}
