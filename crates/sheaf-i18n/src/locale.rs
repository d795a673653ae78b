//! Supported locales and locale detection

use crate::error::{I18nError, I18nResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// Environment variables consulted by [`Locale::detect`], in priority order.
const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// Supported locales
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(try_from = "String", into = "String")]
pub enum Locale {
    #[default]
    English,
    Spanish,
    French,
    German,
}

impl Locale {
    /// Get the language code for this locale
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en-US",
            Self::Spanish => "es-ES",
            Self::French => "fr-FR",
            Self::German => "de-DE",
        }
    }

    /// Get the short language code for this locale
    #[must_use]
    pub const fn short_code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Spanish => "es",
            Self::French => "fr",
            Self::German => "de",
        }
    }

    /// Parse a locale from a language tag.
    ///
    /// Accepts `de`, `de-DE`, and POSIX forms such as `de_DE.UTF-8` or
    /// `de_DE@euro`. Only the language subtag is significant.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let language = code
            .trim()
            .split(['-', '_', '.', '@'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "en" => Some(Self::English),
            "es" => Some(Self::Spanish),
            "fr" => Some(Self::French),
            "de" => Some(Self::German),
            _ => None,
        }
    }

    /// Detect the locale of the process from `LC_ALL`, `LC_MESSAGES` and `LANG`.
    ///
    /// The first variable that is set and non-empty decides; an unsupported
    /// or `C`/`POSIX` value yields `None`.
    #[must_use]
    pub fn detect() -> Option<Self> {
        LOCALE_ENV_VARS
            .iter()
            .filter_map(|var| env::var(var).ok())
            .find(|value| !value.trim().is_empty())
            .and_then(|value| Self::from_code(&value))
    }

    /// Convert to a Fluent language identifier
    pub fn to_language_identifier(self) -> I18nResult<LanguageIdentifier> {
        self.code()
            .parse()
            .map_err(|_| I18nError::InvalidLanguageId(self.code().to_string()))
    }

    /// Get all supported locales
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::English, Self::Spanish, Self::French, Self::German]
    }

    /// Get the display name for this locale
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Spanish => "Español",
            Self::French => "Français",
            Self::German => "Deutsch",
        }
    }

    /// Catalog file for `namespace`, relative to a locales directory
    #[must_use]
    pub fn resource_file(self, namespace: &str) -> String {
        format!("{}/{namespace}.ftl", self.short_code())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| I18nError::InvalidLanguageId(s.to_string()))
    }
}

impl TryFrom<String> for Locale {
    type Error = I18nError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.code().to_string()
    }
}
