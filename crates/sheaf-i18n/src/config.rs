//! Catalog configuration loaded from TOML with environment overrides
//!
//! ```toml
//! namespace = "sheaf"
//! default_locale = "en"
//! locale = "de_DE.UTF-8"
//! locales_dir = "/usr/share/sheaf/locales"
//! bundled = true
//! ```

use crate::catalog::validate_namespace;
use crate::error::{I18nError, I18nResult};
use crate::resource::BUNDLED_NAMESPACE;
use crate::Locale;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path of a configuration file to load instead of the defaults
pub const CONFIG_PATH_VAR: &str = "SHEAF_CATALOG_CONFIG";
/// Overrides [`CatalogConfig::namespace`]
pub const NAMESPACE_VAR: &str = "SHEAF_NAMESPACE";
/// Overrides [`CatalogConfig::locale`]
pub const LOCALE_VAR: &str = "SHEAF_LOCALE";
/// Overrides [`CatalogConfig::default_locale`]
pub const DEFAULT_LOCALE_VAR: &str = "SHEAF_DEFAULT_LOCALE";
/// Overrides [`CatalogConfig::locales_dir`]
pub const LOCALES_DIR_VAR: &str = "SHEAF_LOCALES_DIR";

/// Describes how to build the process catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Namespace prefix of message ids
    pub namespace: String,
    /// Locale consulted when the active locale has no template
    pub default_locale: Locale,
    /// Active locale; detected from the environment when unset
    pub locale: Option<Locale>,
    /// Directory of `<short-locale>/<namespace>.ftl` files
    pub locales_dir: Option<PathBuf>,
    /// Whether to include the catalogs compiled into the crate
    pub bundled: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            namespace: BUNDLED_NAMESPACE.to_string(),
            default_locale: Locale::default(),
            locale: None,
            locales_dir: None,
            bundled: true,
        }
    }
}

impl CatalogConfig {
    /// Parse a TOML document and validate it
    pub fn from_toml_str(content: &str) -> I18nResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file, apply environment overrides, and validate
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> I18nResult<Self> {
        let path = path.as_ref();
        debug!("Loading catalog configuration from {:?}", path);

        let content = std::fs::read_to_string(path).map_err(|source| I18nError::ConfigReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&content)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `SHEAF_CATALOG_CONFIG` if set, otherwise start from the
    /// defaults; environment overrides apply either way.
    pub fn load() -> I18nResult<Self> {
        if let Ok(path) = env::var(CONFIG_PATH_VAR) {
            return Self::load_from_file(path);
        }
        let mut config = Self::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `SHEAF_*` environment variable overrides
    pub fn apply_env_overrides(&mut self) -> I18nResult<()> {
        self.apply_overrides(|var| env::var(var).ok())
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value
    pub fn apply_overrides<F>(&mut self, lookup: F) -> I18nResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(namespace) = lookup(NAMESPACE_VAR) {
            self.namespace = namespace;
        }
        if let Some(value) = lookup(LOCALE_VAR) {
            self.locale = Some(parse_locale_var(LOCALE_VAR, value)?);
        }
        if let Some(value) = lookup(DEFAULT_LOCALE_VAR) {
            self.default_locale = parse_locale_var(DEFAULT_LOCALE_VAR, value)?;
        }
        if let Some(dir) = lookup(LOCALES_DIR_VAR) {
            self.locales_dir = Some(PathBuf::from(dir));
        }
        Ok(())
    }

    /// Check the namespace is a usable Fluent id prefix
    pub fn validate(&self) -> I18nResult<()> {
        validate_namespace(&self.namespace)
    }

    /// The active locale: configured, else detected, else the default locale
    #[must_use]
    pub fn resolved_locale(&self) -> Locale {
        self.locale
            .or_else(Locale::detect)
            .unwrap_or(self.default_locale)
    }
}

fn parse_locale_var(var: &str, value: String) -> I18nResult<Locale> {
    Locale::from_code(&value).ok_or_else(|| I18nError::EnvParseError {
        var: var.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = CatalogConfig::default();
        assert_eq!(config.namespace, "sheaf");
        assert_eq!(config.default_locale, Locale::English);
        assert!(config.locale.is_none());
        assert!(config.bundled);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CatalogConfig::from_toml_str(r#"locale = "de""#).unwrap();
        assert_eq!(config.locale, Some(Locale::German));
        assert_eq!(config.namespace, "sheaf");
        assert!(config.bundled);
        assert_eq!(config.resolved_locale(), Locale::German);
    }

    #[test]
    fn test_full_toml() {
        let config = CatalogConfig::from_toml_str(
            r#"
namespace = "pager"
default_locale = "fr-FR"
locale = "es"
locales_dir = "/srv/locales"
bundled = false
"#,
        )
        .unwrap();
        assert_eq!(config.namespace, "pager");
        assert_eq!(config.default_locale, Locale::French);
        assert_eq!(config.locale, Some(Locale::Spanish));
        assert_eq!(config.locales_dir, Some(PathBuf::from("/srv/locales")));
        assert!(!config.bundled);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            CatalogConfig::from_toml_str(r#"locale = "xx""#),
            Err(I18nError::ConfigParseError(_))
        ));
        assert!(matches!(
            CatalogConfig::from_toml_str(r#"namespace = "9lives""#),
            Err(I18nError::InvalidNamespace(_))
        ));
        assert!(matches!(
            CatalogConfig::from_toml_str(r#"colour = "blue""#),
            Err(I18nError::ConfigParseError(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            (LOCALE_VAR, "de_DE.UTF-8"),
            (DEFAULT_LOCALE_VAR, "es"),
            (LOCALES_DIR_VAR, "/opt/locales"),
            (NAMESPACE_VAR, "pager"),
        ]
        .into_iter()
        .collect();

        let mut config = CatalogConfig::default();
        config
            .apply_overrides(|var| vars.get(var).map(ToString::to_string))
            .unwrap();
        assert_eq!(config.locale, Some(Locale::German));
        assert_eq!(config.default_locale, Locale::Spanish);
        assert_eq!(config.locales_dir, Some(PathBuf::from("/opt/locales")));
        assert_eq!(config.namespace, "pager");
    }

    #[test]
    fn test_bad_override_names_variable() {
        let mut config = CatalogConfig::default();
        let err = config
            .apply_overrides(|var| (var == LOCALE_VAR).then(|| "tlh".to_string()))
            .unwrap_err();
        assert!(matches!(err, I18nError::EnvParseError { ref var, .. } if var == LOCALE_VAR));
    }

    #[test]
    fn test_missing_file() {
        let err = CatalogConfig::load_from_file("/nonexistent/sheaf.toml").unwrap_err();
        assert!(matches!(err, I18nError::ConfigReadError { .. }));
    }
}
