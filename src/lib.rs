//! # Warden
//!
//! Two small request-handling utilities and the glue to run them.
//!
//! ## Redaction
//!
//! Log messages are written as `key=value` pairs separated by `;`. Any pair
//! whose key is a known PII field (`name`, `email`, `phone`, `ssn`,
//! `password`) has its value replaced with `***` before the line is emitted.
//! The process-wide subscriber installs [`redact::RedactingFormatter`], so
//! this applies to every event, not only the ones that carry user data.
//!
//! ## Authentication
//!
//! [`auth::require_auth`] decides whether a path needs authentication given a
//! list of exclusion patterns. A pattern ending in `*` excludes every path
//! with that prefix, anything else must match exactly. Paths and patterns are
//! compared with a single trailing slash.

pub mod api;
pub mod auth;
pub mod cli;
pub mod db;
pub mod redact;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
