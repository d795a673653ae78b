//! Coded errors with deferred message formatting

use crate::defect::MessageDefect;
use sheaf_i18n::{registry, Argument, MessageCatalog};
use std::error::Error as StdError;
use std::fmt;
use std::panic;
use tracing::error;

/// Result type for operations that fail with a [`CodedError`]
pub type Result<T, E = CodedError> = std::result::Result<T, E>;

type Cause = Box<dyn StdError + Send + Sync + 'static>;

/// An error identified by a numeric code.
///
/// The code doubles as the catalog key: its decimal string selects the
/// message template, and the arguments attached with [`add`](Self::add) fill
/// the template's positional placeholders in the order they were added.
/// The message is formatted every time it is read and never stored.
///
/// Arguments should be attached before the error is returned; once a
/// consumer may have read the message, adding more changes what it says.
#[derive(Debug)]
pub struct CodedError {
    code: i32,
    arguments: Vec<Argument>,
    cause: Option<Cause>,
}

impl CodedError {
    /// Create an error with the given code and no arguments.
    #[must_use]
    pub const fn new(code: i32) -> Self {
        Self {
            code,
            arguments: Vec::new(),
            cause: None,
        }
    }

    /// Wrap `cause` in an error with the given code.
    ///
    /// The cause is reported through [`std::error::Error::source`] and is
    /// not part of the formatted message.
    pub fn with_cause<E>(code: i32, cause: E) -> Self
    where
        E: Into<Cause>,
    {
        Self {
            code,
            arguments: Vec::new(),
            cause: Some(cause.into()),
        }
    }

    /// Append a message argument, for chaining at the raise site.
    ///
    /// ```rust
    /// # use sheaf_error::CodedError;
    /// let error = CodedError::new(102).add(4096).add(8192);
    /// assert_eq!(error.arguments().len(), 2);
    /// ```
    #[must_use]
    pub fn add(mut self, argument: impl Into<Argument>) -> Self {
        self.arguments.push(argument.into());
        self
    }

    /// Append a message argument in place.
    pub fn push(&mut self, argument: impl Into<Argument>) -> &mut Self {
        self.arguments.push(argument.into());
        self
    }

    /// The error code
    #[must_use]
    pub const fn code(&self) -> i32 {
        self.code
    }

    /// The catalog key, the decimal string of the code
    #[must_use]
    pub fn key(&self) -> String {
        self.code.to_string()
    }

    /// Arguments in the order they were added
    #[must_use]
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// The wrapped error, if any
    #[must_use]
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Format the message against the process-wide catalog.
    ///
    /// A code without a template yields its key. A template the arguments do
    /// not fit yields a [`MessageDefect`].
    pub fn try_message(&self) -> Result<String, MessageDefect> {
        self.try_message_with(&*registry::current())
    }

    /// Format the message against `catalog`.
    pub fn try_message_with<C>(&self, catalog: &C) -> Result<String, MessageDefect>
    where
        C: MessageCatalog + ?Sized,
    {
        let key = self.key();
        match catalog.format(&key, &self.arguments) {
            Ok(Some(message)) => Ok(message),
            Ok(None) => Ok(key),
            Err(defect) => {
                error!(
                    code = self.code,
                    namespace = catalog.namespace(),
                    "Arguments do not fit the message template: {}",
                    defect
                );
                Err(MessageDefect::new(key, defect))
            }
        }
    }

    /// The message, formatted against the process-wide catalog.
    ///
    /// # Panics
    ///
    /// Panics when the attached arguments do not fit the template for this
    /// code. The panic payload is the [`MessageDefect`], so it can be
    /// recovered with `downcast` after `catch_unwind`.
    #[must_use]
    pub fn message(&self) -> String {
        self.message_with(&*registry::current())
    }

    /// The message, formatted against `catalog`.
    ///
    /// # Panics
    ///
    /// Panics when the attached arguments do not fit the template for this
    /// code. The panic payload is the [`MessageDefect`], so it can be
    /// recovered with `downcast` after `catch_unwind`.
    #[must_use]
    pub fn message_with<C>(&self, catalog: &C) -> String
    where
        C: MessageCatalog + ?Sized,
    {
        match self.try_message_with(catalog) {
            Ok(message) => message,
            Err(defect) => panic::panic_any(defect),
        }
    }
}

impl fmt::Display for CodedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl StdError for CodedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn StdError + 'static))
    }
}
