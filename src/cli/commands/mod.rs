pub mod auth;
pub mod database;
pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const CMD_SERVER: &str = "server";
pub const CMD_USERS: &str = "users";

/// The `server` subcommand, also the default when none is given.
#[must_use]
pub fn server() -> Command {
    let command = Command::new(CMD_SERVER)
        .about("Serve the API behind the path-exclusion auth guard")
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("WARDEN_PORT")
                .value_parser(clap::value_parser!(u16)),
        );

    auth::with_args(command)
}

fn users() -> Command {
    let command =
        Command::new(CMD_USERS).about("Log every row of the users table with PII redacted");

    database::with_args(command)
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("warden")
        .about("PII redacting logs and path-exclusion authentication")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand(server())
        .subcommand(users());

    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "warden");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("PII redacting logs and path-exclusion authentication".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_subcommand_optional() {
        let matches = new().try_get_matches_from(vec!["warden"]);
        assert!(matches.is_ok_and(|m| m.subcommand().is_none()));
    }

    #[test]
    fn test_check_port() {
        temp_env::with_vars([("WARDEN_PORT", None::<&str>)], || {
            let matches = new().get_matches_from(vec!["warden", "server", "--port", "9000"]);
            let server = matches.subcommand_matches(CMD_SERVER);
            assert_eq!(
                server.and_then(|m| m.get_one::<u16>("port").copied()),
                Some(9000)
            );
        });
    }

    #[test]
    fn test_check_port_env() {
        temp_env::with_vars([("WARDEN_PORT", Some("443"))], || {
            let matches = new().get_matches_from(vec!["warden", "server"]);
            let server = matches.subcommand_matches(CMD_SERVER);
            assert_eq!(
                server.and_then(|m| m.get_one::<u16>("port").copied()),
                Some(443)
            );
        });
    }

    #[test]
    fn test_global_verbosity() {
        temp_env::with_vars([("WARDEN_LOG_LEVEL", None::<&str>)], || {
            let matches = new().get_matches_from(vec!["warden", "users", "-vv"]);
            let users = matches.subcommand_matches(CMD_USERS);
            assert_eq!(
                users.and_then(|m| m.get_one::<u8>(logging::ARG_VERBOSITY).copied()),
                Some(2)
            );
        });
    }
}
