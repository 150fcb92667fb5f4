use crate::db;
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_DB_HOST: &str = "db-host";
pub const ARG_DB_NAME: &str = "db-name";
pub const ARG_DB_USERNAME: &str = "db-username";
pub const ARG_DB_PASSWORD: &str = "db-password";

/// Parse database arguments from matches.
///
/// # Errors
/// Returns an error if the database name is missing.
pub fn parse(matches: &ArgMatches) -> anyhow::Result<db::Options> {
    let read = |id: &str| matches.get_one::<String>(id).cloned().unwrap_or_default();

    let name = matches
        .get_one::<String>(ARG_DB_NAME)
        .cloned()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| {
            anyhow::anyhow!("missing required argument: --{ARG_DB_NAME} (PERSONAL_DATA_DB_NAME)")
        })?;

    Ok(db::Options {
        host: read(ARG_DB_HOST),
        name,
        username: read(ARG_DB_USERNAME),
        password: SecretString::from(read(ARG_DB_PASSWORD)),
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_DB_HOST)
                .long(ARG_DB_HOST)
                .help("Personal data database host")
                .env("PERSONAL_DATA_DB_HOST")
                .default_value("localhost"),
        )
        .arg(
            Arg::new(ARG_DB_NAME)
                .long(ARG_DB_NAME)
                .help("Personal data database name")
                .env("PERSONAL_DATA_DB_NAME"),
        )
        .arg(
            Arg::new(ARG_DB_USERNAME)
                .long(ARG_DB_USERNAME)
                .help("Personal data database username")
                .env("PERSONAL_DATA_DB_USERNAME")
                .default_value("root"),
        )
        .arg(
            Arg::new(ARG_DB_PASSWORD)
                .long(ARG_DB_PASSWORD)
                .help("Personal data database password")
                .env("PERSONAL_DATA_DB_PASSWORD")
                .hide_env_values(true),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn command() -> Command {
        with_args(Command::new("users"))
    }

    const UNSET: [(&str, Option<&str>); 4] = [
        ("PERSONAL_DATA_DB_HOST", None),
        ("PERSONAL_DATA_DB_NAME", None),
        ("PERSONAL_DATA_DB_USERNAME", None),
        ("PERSONAL_DATA_DB_PASSWORD", None),
    ];

    #[test]
    fn test_missing_name_is_error() {
        temp_env::with_vars(UNSET, || {
            let matches = command().get_matches_from(vec!["users"]);
            let err = parse(&matches).err().map(|e| e.to_string());
            assert!(err.is_some_and(|e| e.contains("PERSONAL_DATA_DB_NAME")));
        });
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars(UNSET, || {
            let matches = command().get_matches_from(vec!["users", "--db-name", "holberton"]);
            let options = parse(&matches).ok();
            let options = options.as_ref();
            assert_eq!(options.map(|o| o.host.as_str()), Some("localhost"));
            assert_eq!(options.map(|o| o.name.as_str()), Some("holberton"));
            assert_eq!(options.map(|o| o.username.as_str()), Some("root"));
            assert_eq!(options.map(|o| o.password.expose_secret()), Some(""));
        });
    }

    #[test]
    fn test_env() {
        temp_env::with_vars(
            [
                ("PERSONAL_DATA_DB_HOST", Some("db.local")),
                ("PERSONAL_DATA_DB_NAME", Some("my_db")),
                ("PERSONAL_DATA_DB_USERNAME", Some("alice")),
                ("PERSONAL_DATA_DB_PASSWORD", Some("s3cret")),
            ],
            || {
                let matches = command().get_matches_from(vec!["users"]);
                let options = parse(&matches).ok();
                let options = options.as_ref();
                assert_eq!(options.map(|o| o.host.as_str()), Some("db.local"));
                assert_eq!(options.map(|o| o.name.as_str()), Some("my_db"));
                assert_eq!(options.map(|o| o.username.as_str()), Some("alice"));
                assert_eq!(options.map(|o| o.password.expose_secret()), Some("s3cret"));
            },
        );
    }
}
