//! Loading of Fluent catalog resources

use crate::error::{I18nError, I18nResult};
use crate::Locale;
use fluent::FluentResource;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Namespace of the catalogs compiled into this crate
pub const BUNDLED_NAMESPACE: &str = "sheaf";

const BUNDLED_EN: &str = include_str!("../locales/en/sheaf.ftl");
const BUNDLED_DE: &str = include_str!("../locales/de/sheaf.ftl");

/// Catalog source compiled into the crate for `locale`, if one ships.
#[must_use]
pub const fn bundled_source(locale: Locale) -> Option<&'static str> {
    match locale {
        Locale::English => Some(BUNDLED_EN),
        Locale::German => Some(BUNDLED_DE),
        Locale::Spanish | Locale::French => None,
    }
}

/// Parse Fluent source text. `origin` names the source in errors.
pub fn parse_resource(source: String, origin: &str) -> I18nResult<FluentResource> {
    FluentResource::try_new(source).map_err(|(_, errors)| {
        let errors: Vec<String> = errors.into_iter().map(|e| format!("{e:?}")).collect();
        error!("Failed to parse Fluent resource {}: {:?}", origin, errors);
        I18nError::FluentParseError {
            origin: origin.to_string(),
            errors,
        }
    })
}

/// Locates catalog files under a locales directory.
///
/// Files are laid out as `<base_dir>/<short-locale>/<namespace>.ftl`.
#[derive(Debug, Clone)]
pub struct ResourceLoader {
    base_dir: PathBuf,
    namespace: String,
}

impl ResourceLoader {
    /// Create a loader for `namespace` catalogs under `base_dir`
    pub fn new<P: AsRef<Path>>(base_dir: P, namespace: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            namespace: namespace.into(),
        }
    }

    /// Path of the catalog file for `locale`
    #[must_use]
    pub fn path_for(&self, locale: Locale) -> PathBuf {
        self.base_dir.join(locale.resource_file(&self.namespace))
    }

    /// Whether a catalog file exists for `locale`
    #[must_use]
    pub fn exists(&self, locale: Locale) -> bool {
        self.path_for(locale).is_file()
    }

    /// Load and parse the catalog file for `locale`
    pub fn load(&self, locale: Locale) -> I18nResult<FluentResource> {
        let path = self.path_for(locale);
        debug!("Loading catalog file: {:?}", path);

        let content = fs::read_to_string(&path).map_err(|source| I18nError::ResourceLoadError {
            path: path.clone(),
            source,
        })?;

        parse_resource(content, &path.to_string_lossy())
    }

    /// Get the base directory for catalog files
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the namespace whose catalogs are loaded
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}
