//! Personal data database connector.

use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    FromRow, MySqlPool,
};
use tracing::{debug, info, instrument};

pub const DEFAULT_PORT: u16 = 3306;

/// Logger target for user rows.
pub const USER_DATA_TARGET: &str = "user_data";

const SELECT_USERS: &str = "SELECT name, email, phone, ssn, password, ip, \
     CAST(last_login AS CHAR) AS last_login, user_agent FROM users";

#[derive(Debug, Clone)]
pub struct Options {
    pub host: String,
    pub name: String,
    pub username: String,
    pub password: SecretString,
}

impl Options {
    #[must_use]
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(DEFAULT_PORT)
            .database(&self.name)
            .username(&self.username)
            .password(self.password.expose_secret())
    }
}

/// Open a pool to the personal data database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
#[instrument(skip(options), fields(host = %options.host, database = %options.name))]
pub async fn connect(options: &Options) -> Result<MySqlPool> {
    let pool = MySqlPoolOptions::new()
        .max_connections(1)
        .connect_with(options.connect_options())
        .await
        .with_context(|| format!("failed to connect to database {}", options.name))?;

    debug!("connected to database");

    Ok(pool)
}

#[derive(Debug, Clone, Default, FromRow)]
pub struct UserRecord {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub ssn: Option<String>,
    pub password: Option<String>,
    pub ip: Option<String>,
    pub last_login: Option<String>,
    pub user_agent: Option<String>,
}

impl UserRecord {
    /// Render the row as `key=value; key=value; ...;`.
    #[must_use]
    pub fn message(&self) -> String {
        let columns = [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("ssn", &self.ssn),
            ("password", &self.password),
            ("ip", &self.ip),
            ("last_login", &self.last_login),
            ("user_agent", &self.user_agent),
        ];

        let pairs = columns
            .iter()
            .map(|(key, value)| format!("{key}={}", value.as_deref().unwrap_or("")))
            .collect::<Vec<_>>();

        format!("{};", pairs.join("; "))
    }
}

/// Log every row of the users table on [`USER_DATA_TARGET`].
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn dump_users(pool: &MySqlPool) -> Result<usize> {
    let users: Vec<UserRecord> = sqlx::query_as(SELECT_USERS)
        .fetch_all(pool)
        .await
        .context("failed to select users")?;

    for user in &users {
        info!(target: USER_DATA_TARGET, "{}", user.message());
    }

    Ok(users.len())
}
