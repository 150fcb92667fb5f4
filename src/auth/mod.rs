//! Request authentication helpers.
//!
//! [`HeaderAuth`] only knows about the `Authorization` header. [`SessionAuth`]
//! adds the session cookie. Neither resolves a user on its own; concrete
//! schemes override [`Auth::current_user`].

pub mod paths;

pub use self::paths::require_auth;

use axum::http::{
    header::{AUTHORIZATION, COOKIE},
    HeaderMap,
};
use serde::Serialize;
use std::{fmt, str::FromStr};

pub const DEFAULT_SESSION_NAME: &str = "_my_session_id";

/// Authenticated user resolved from a request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub id: String,
    pub email: String,
}

pub trait Auth: Send + Sync {
    /// See [`paths::require_auth`].
    fn require_auth(&self, path: Option<&str>, excluded_paths: Option<&[String]>) -> bool {
        paths::require_auth(path, excluded_paths)
    }

    /// Raw `Authorization` header value, if the request carries one.
    fn authorization_header(&self, headers: Option<&HeaderMap>) -> Option<String> {
        headers?
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    }

    fn current_user(&self, _headers: Option<&HeaderMap>) -> Option<Principal> {
        None
    }

    fn session_cookie(&self, _headers: Option<&HeaderMap>) -> Option<String> {
        None
    }
}

/// Header based authentication.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeaderAuth;

impl Auth for HeaderAuth {}

/// Cookie/session based authentication.
#[derive(Clone, Debug)]
pub struct SessionAuth {
    session_name: String,
}

impl SessionAuth {
    #[must_use]
    pub fn new(session_name: impl Into<String>) -> Self {
        Self {
            session_name: session_name.into(),
        }
    }
}

impl Default for SessionAuth {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_NAME)
    }
}

impl Auth for SessionAuth {
    fn session_cookie(&self, headers: Option<&HeaderMap>) -> Option<String> {
        cookie_value(headers?, &self.session_name)
    }
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, val) = pair.trim().split_once('=')?;
            (key.trim() == name).then(|| val.trim().to_string())
        })
}

/// Authentication scheme selected at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthKind {
    Header,
    Session,
}

impl AuthKind {
    #[must_use]
    pub fn build(self, session_name: &str) -> Box<dyn Auth> {
        match self {
            Self::Header => Box::new(HeaderAuth),
            Self::Session => Box::new(SessionAuth::new(session_name)),
        }
    }
}

impl FromStr for AuthKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auth" | "header" | "basic_auth" => Ok(Self::Header),
            "session" | "session_auth" => Ok(Self::Session),
            other => Err(format!("unknown auth type: {other}")),
        }
    }
}

impl fmt::Display for AuthKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => write!(f, "auth"),
            Self::Session => write!(f, "session_auth"),
        }
    }
}
