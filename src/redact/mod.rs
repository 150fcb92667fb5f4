//! PII redaction for `key=value` log messages.

pub mod formatter;

pub use self::formatter::RedactingFormatter;

use anyhow::{Context, Result};
use regex::{Captures, Regex};

/// Fields treated as personally identifiable information.
pub const PII_FIELDS: [&str; 5] = ["name", "email", "phone", "ssn", "password"];

/// Placeholder written in place of a redacted value.
pub const REDACTION: &str = "***";

/// Separator between `key=value` pairs.
pub const SEPARATOR: char = ';';

/// Precompiled redaction rule set.
///
/// A value runs from the `=` after a listed field up to the next separator
/// or the end of the message. Matching is textual, so a field also matches
/// as the tail of a longer key (`username=` matches `name`).
#[derive(Debug, Clone)]
pub struct Redactor {
    pattern: Option<Regex>,
    redaction: String,
}

impl Redactor {
    /// Build a redactor for `fields`.
    ///
    /// # Errors
    ///
    /// Returns an error if the combined pattern cannot be compiled.
    pub fn new<S: AsRef<str>>(fields: &[S], redaction: &str, separator: char) -> Result<Self> {
        let pattern = if fields.is_empty() {
            None
        } else {
            let alternation = fields
                .iter()
                .map(|field| regex::escape(field.as_ref()))
                .collect::<Vec<_>>()
                .join("|");
            let separator = regex::escape(&separator.to_string());
            let source = format!("({alternation})=[^{separator}]*");
            Some(
                Regex::new(&source)
                    .with_context(|| format!("invalid redaction pattern: {source}"))?,
            )
        };

        Ok(Self {
            pattern,
            redaction: redaction.to_string(),
        })
    }

    /// Redactor over [`PII_FIELDS`] with the default token and separator.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern cannot be compiled.
    pub fn pii() -> Result<Self> {
        Self::new(&PII_FIELDS, REDACTION, SEPARATOR)
    }

    #[must_use]
    pub fn redact(&self, message: &str) -> String {
        match &self.pattern {
            Some(pattern) => pattern
                .replace_all(message, |caps: &Captures| {
                    format!("{}={}", &caps[1], self.redaction)
                })
                .into_owned(),
            None => message.to_string(),
        }
    }
}

/// Obfuscate the values of `fields` in `message`.
///
/// Never fails: if the pattern cannot be built the message is returned as is.
#[must_use]
pub fn filter_datum<S: AsRef<str>>(
    fields: &[S],
    redaction: &str,
    message: &str,
    separator: char,
) -> String {
    Redactor::new(fields, redaction, separator)
        .map_or_else(|_| message.to_string(), |redactor| redactor.redact(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacts_single_field() {
        assert_eq!(
            filter_datum(&["password"], "***", "password=123;name=bob;", ';'),
            "password=***;name=bob;"
        );
    }

    #[test]
    fn test_redacts_multiple_fields() {
        let message = "name=egg;email=eggmin@eggsample.com;password=eggcellent;date_of_birth=12/12/1986;";
        assert_eq!(
            filter_datum(&["password", "date_of_birth"], "xxx", message, ';'),
            "name=egg;email=eggmin@eggsample.com;password=xxx;date_of_birth=xxx;"
        );
    }

    #[test]
    fn test_value_runs_to_end_of_message() {
        assert_eq!(
            filter_datum(&["ssn"], "***", "name=bob;ssn=123-45-6789", ';'),
            "name=bob;ssn=***"
        );
    }

    #[test]
    fn test_absent_field_is_noop() {
        let message = "name=bob;ip=10.0.0.1;";
        assert_eq!(filter_datum(&["password"], "***", message, ';'), message);
    }

    #[test]
    fn test_empty_field_list_is_noop() {
        let message = "password=123;name=bob;";
        assert_eq!(filter_datum::<&str>(&[], "***", message, ';'), message);
    }

    #[test]
    fn test_every_occurrence_is_redacted() {
        assert_eq!(
            filter_datum(&["email"], "***", "email=a@b.c;email=d@e.f;", ';'),
            "email=***;email=***;"
        );
    }

    #[test]
    fn test_matching_is_textual() {
        assert_eq!(
            filter_datum(&["name"], "***", "username=bob;", ';'),
            "username=***;"
        );
    }

    #[test]
    fn test_custom_separator() {
        assert_eq!(
            filter_datum(&["password"], "***", "password=a;b|name=bob|", '|'),
            "password=***|name=bob|"
        );
    }

    #[test]
    fn test_metacharacters_are_literal() {
        assert_eq!(
            filter_datum(&["a.b"], "***", "a.b=1;axb=2;", ';'),
            "a.b=***;axb=2;"
        );
        assert_eq!(
            filter_datum(&["key"], "$1", "key=secret;", ';'),
            "key=$1;"
        );
        assert_eq!(filter_datum(&["k"], "*", "k=v]x;", ']'), "k=*]x;");
    }

    #[test]
    fn test_pii_redactor() {
        let redactor = Redactor::pii().ok();
        let redacted = redactor.map(|r| {
            r.redact("name=bob; email=bob@dylan.com; phone=555; ssn=000; password=x; ip=1.2.3.4;")
        });
        assert_eq!(
            redacted.as_deref(),
            Some("name=***; email=***; phone=***; ssn=***; password=***; ip=1.2.3.4;")
        );
    }
}
