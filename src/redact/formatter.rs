//! Event formatter that redacts PII before a line reaches the writer.

use super::{Redactor, REDACTION, SEPARATOR};
use anyhow::Result;
use std::fmt;
use tracing::{Event, Subscriber};
use tracing_subscriber::{
    fmt::{
        format::Writer,
        time::{FormatTime, SystemTime},
        FmtContext, FormatEvent, FormatFields,
    },
    registry::LookupSpan,
};

const PREFIX: &str = "WARDEN";

/// Renders `[WARDEN] <target> <LEVEL> <time>: <message>` with the message
/// fields passed through a [`Redactor`].
#[derive(Debug, Clone)]
pub struct RedactingFormatter<T = SystemTime> {
    redactor: Redactor,
    timer: T,
}

impl RedactingFormatter {
    /// # Errors
    ///
    /// Returns an error if the redaction pattern cannot be compiled.
    pub fn new<S: AsRef<str>>(fields: &[S]) -> Result<Self> {
        Ok(Self {
            redactor: Redactor::new(fields, REDACTION, SEPARATOR)?,
            timer: SystemTime,
        })
    }

    /// Formatter over [`PII_FIELDS`](super::PII_FIELDS).
    ///
    /// # Errors
    ///
    /// Returns an error if the redaction pattern cannot be compiled.
    pub fn pii() -> Result<Self> {
        Ok(Self {
            redactor: Redactor::pii()?,
            timer: SystemTime,
        })
    }
}

impl<T> RedactingFormatter<T> {
    #[must_use]
    pub fn with_timer<T2>(self, timer: T2) -> RedactingFormatter<T2> {
        RedactingFormatter {
            redactor: self.redactor,
            timer,
        }
    }
}

impl<S, N, T> FormatEvent<S, N> for RedactingFormatter<T>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
    T: FormatTime,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        write!(writer, "[{PREFIX}] {} {} ", metadata.target(), metadata.level())?;
        self.timer.format_time(&mut writer)?;

        // fields are rendered to a scratch buffer so nothing unredacted hits the writer
        let mut message = String::new();
        ctx.format_fields(Writer::new(&mut message), event)?;

        writeln!(writer, ": {}", self.redactor.redact(&message))
    }
}
