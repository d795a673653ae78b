//! Error types for catalog loading and message formatting

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building a message catalog
#[derive(Error, Debug)]
pub enum I18nError {
    /// Failed to parse a language identifier
    #[error("Invalid language identifier: {0}")]
    InvalidLanguageId(String),

    /// Failed to read a catalog file
    #[error("Failed to load catalog file {path:?}: {source}")]
    ResourceLoadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a Fluent resource
    #[error("Failed to parse Fluent resource {origin}: {errors:?}")]
    FluentParseError { origin: String, errors: Vec<String> },

    /// Adding a resource or function to a bundle failed
    #[error("Failed to build bundle for locale {locale}: {errors:?}")]
    BundleCreationError { locale: String, errors: Vec<String> },

    /// Namespace is not usable as a Fluent identifier prefix
    #[error("Invalid catalog namespace '{0}': must start with a letter and contain only letters, digits, '_' or '-'")]
    InvalidNamespace(String),

    /// Failed to read a configuration file
    #[error("Failed to read configuration file {path:?}: {source}")]
    ConfigReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML configuration
    #[error("Failed to parse catalog configuration: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    /// An environment variable override could not be used
    #[error("Invalid value '{value}' for environment variable {var}")]
    EnvParseError { var: String, value: String },
}

/// Result type for catalog operations
pub type I18nResult<T> = Result<T, I18nError>;

/// A template and the arguments supplied for it do not fit together.
///
/// This is a defect in the code that attached the arguments, never a
/// condition to recover from at runtime.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatDefect {
    /// The template references a position past the end of the arguments
    #[error("message '{id}' references $arg{position} but only {supplied} argument(s) were supplied")]
    MissingArgument {
        id: String,
        position: usize,
        supplied: usize,
    },

    /// The argument at a typed position has the wrong kind
    #[error("message '{id}' expects a {expected} for $arg{position}, found a {found}")]
    TypeMismatch {
        id: String,
        position: usize,
        expected: &'static str,
        found: &'static str,
    },

    /// The template uses a variable that is not a positional placeholder
    #[error("message '{id}' uses placeholder ${name}, expected $argN")]
    UnknownPlaceholder { id: String, name: String },

    /// Fluent reported errors while resolving the template
    #[error("message '{id}' failed to resolve: {errors:?}")]
    Resolver { id: String, errors: Vec<String> },
}

impl FormatDefect {
    /// The Fluent id of the offending message
    #[must_use]
    pub fn message_id(&self) -> &str {
        match self {
            Self::MissingArgument { id, .. }
            | Self::TypeMismatch { id, .. }
            | Self::UnknownPlaceholder { id, .. }
            | Self::Resolver { id, .. } => id,
        }
    }
}
