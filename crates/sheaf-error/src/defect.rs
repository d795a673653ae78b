//! The defect raised when an error's arguments do not fit its template

use sheaf_i18n::FormatDefect;
use thiserror::Error;

/// The arguments attached to a [`CodedError`](crate::CodedError) do not fit
/// the catalog template for its code.
///
/// This is a bug at the raise site, not a runtime condition. It is kept apart
/// from the coded error it was formatting so that the real defect is never
/// reported as the business error the raise site meant to report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unable to format the message for error code {key}: {source}")]
pub struct MessageDefect {
    key: String,
    #[source]
    source: FormatDefect,
}

impl MessageDefect {
    pub(crate) const fn new(key: String, source: FormatDefect) -> Self {
        Self { key, source }
    }

    /// Catalog key (the decimal error code) whose template failed
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// What did not fit
    #[must_use]
    pub const fn defect(&self) -> &FormatDefect {
        &self.source
    }
}
