use crate::{
    api::DEFAULT_EXCLUDED_PATHS,
    auth::{AuthKind, DEFAULT_SESSION_NAME},
};
use clap::{builder::ValueParser, Arg, ArgAction, ArgMatches, Command};

pub const ARG_AUTH_TYPE: &str = "auth-type";
pub const ARG_SESSION_NAME: &str = "session-name";
pub const ARG_EXCLUDED_PATHS: &str = "excluded-paths";

#[derive(Debug, Clone)]
pub struct Options {
    pub kind: AuthKind,
    pub session_name: String,
    pub excluded_paths: Vec<String>,
}

impl Options {
    /// Parse auth arguments from matches.
    ///
    /// # Errors
    /// Returns an error if the session name is empty.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let kind = matches
            .get_one::<AuthKind>(ARG_AUTH_TYPE)
            .copied()
            .unwrap_or(AuthKind::Header);

        let session_name = matches
            .get_one::<String>(ARG_SESSION_NAME)
            .cloned()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --{ARG_SESSION_NAME}"))?;

        let excluded_paths = matches
            .get_many::<String>(ARG_EXCLUDED_PATHS)
            .map(|values| {
                values
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            kind,
            session_name,
            excluded_paths,
        })
    }
}

fn validator_auth_type() -> ValueParser {
    ValueParser::from(move |value: &str| -> std::result::Result<AuthKind, String> {
        value.parse::<AuthKind>()
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_AUTH_TYPE)
                .long(ARG_AUTH_TYPE)
                .help("Authentication scheme: auth (header) or session_auth (cookie)")
                .env("AUTH_TYPE")
                .default_value("auth")
                .value_parser(validator_auth_type()),
        )
        .arg(
            Arg::new(ARG_SESSION_NAME)
                .long(ARG_SESSION_NAME)
                .help("Name of the session cookie")
                .env("SESSION_NAME")
                .default_value(DEFAULT_SESSION_NAME),
        )
        .arg(
            Arg::new(ARG_EXCLUDED_PATHS)
                .long(ARG_EXCLUDED_PATHS)
                .help("Paths that skip authentication, a trailing * matches by prefix")
                .env("WARDEN_EXCLUDED_PATHS")
                .value_delimiter(',')
                .action(ArgAction::Append)
                .default_values(DEFAULT_EXCLUDED_PATHS),
        )
}
