//! Message catalogs keyed by error code
//!
//! A catalog maps the decimal string of an error code to a Fluent template.
//! Within a Fluent bundle the message id is `<namespace>-<key>`, so the
//! template for code `404` in the `sheaf` namespace is `sheaf-404`.

use crate::argument::Argument;
use crate::bundle::BundleManager;
use crate::config::CatalogConfig;
use crate::error::{FormatDefect, I18nError, I18nResult};
use crate::resource::{bundled_source, parse_resource, ResourceLoader, BUNDLED_NAMESPACE};
use crate::Locale;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// A read-only lookup from code keys to formatted messages.
pub trait MessageCatalog: Send + Sync {
    /// Namespace whose messages this catalog holds
    fn namespace(&self) -> &str;

    /// Format the template for `key` with positional `args`.
    ///
    /// `Ok(None)` means the catalog has no template for `key`. An `Err` means
    /// the template exists but does not fit `args`.
    fn format(&self, key: &str, args: &[Argument]) -> Result<Option<String>, FormatDefect>;
}

impl<T: MessageCatalog + ?Sized> MessageCatalog for Arc<T> {
    fn namespace(&self) -> &str {
        (**self).namespace()
    }

    fn format(&self, key: &str, args: &[Argument]) -> Result<Option<String>, FormatDefect> {
        (**self).format(key, args)
    }
}

/// Fluent backed catalog for one namespace, with default-locale fallback.
#[derive(Debug)]
pub struct Catalog {
    namespace: String,
    locale: Locale,
    default_locale: Locale,
    bundles: BundleManager,
}

impl Catalog {
    /// Start building a catalog for `namespace`
    pub fn builder(namespace: impl Into<String>) -> CatalogBuilder {
        CatalogBuilder::new(namespace)
    }

    /// A catalog with no templates; every lookup is absent.
    pub fn empty(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            locale: Locale::default(),
            default_locale: Locale::default(),
            bundles: BundleManager::new(),
        }
    }

    /// The catalogs compiled into this crate, for the locale of the process.
    pub fn bundled() -> I18nResult<Self> {
        Self::builder(BUNDLED_NAMESPACE)
            .with_bundled()
            .locale(Locale::detect().unwrap_or_default())
            .build()
    }

    /// Build the catalog described by `config`
    pub fn from_config(config: &CatalogConfig) -> I18nResult<Self> {
        let mut builder = Self::builder(config.namespace.clone())
            .default_locale(config.default_locale)
            .locale(config.resolved_locale());
        if config.bundled {
            builder = builder.with_bundled();
        }
        if let Some(dir) = &config.locales_dir {
            builder = builder.locales_dir(dir);
        }
        builder.build()
    }

    /// Return this catalog with a different active locale
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Active locale, consulted first
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Locale consulted when the active locale has no template
    #[must_use]
    pub const fn default_locale(&self) -> Locale {
        self.default_locale
    }

    /// Locales with at least one loaded resource
    #[must_use]
    pub fn loaded_locales(&self) -> Vec<Locale> {
        self.bundles.available_locales()
    }

    /// Fluent message id for `key`
    #[must_use]
    pub fn message_id(&self, key: &str) -> String {
        format!("{}-{key}", self.namespace)
    }

    /// Whether a template exists for `key` in the active or default locale
    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        let id = self.message_id(key);
        self.bundles.has_message(self.locale, &id) || self.bundles.has_message(self.default_locale, &id)
    }
}

impl MessageCatalog for Catalog {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn format(&self, key: &str, args: &[Argument]) -> Result<Option<String>, FormatDefect> {
        let id = self.message_id(key);

        if self.bundles.has_message(self.locale, &id) {
            return self.bundles.format_message(self.locale, &id, args);
        }

        if self.locale != self.default_locale && self.bundles.has_message(self.default_locale, &id) {
            debug!(
                "Message '{}' not found in locale {}, falling back to default locale {}",
                id, self.locale, self.default_locale
            );
            return self.bundles.format_message(self.default_locale, &id, args);
        }

        trace!("No message '{}' in catalog", id);
        Ok(None)
    }
}

/// Builder for [`Catalog`].
///
/// Resources are layered: bundled catalogs first, then files from the
/// locales directory, then in-memory sources. A later layer replaces
/// templates of an earlier one.
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    namespace: String,
    default_locale: Locale,
    locale: Option<Locale>,
    include_bundled: bool,
    locales_dir: Option<PathBuf>,
    sources: Vec<(Locale, String)>,
}

impl CatalogBuilder {
    fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            default_locale: Locale::default(),
            locale: None,
            include_bundled: false,
            locales_dir: None,
            sources: Vec::new(),
        }
    }

    /// Locale consulted when the active locale has no template
    #[must_use]
    pub fn default_locale(mut self, locale: Locale) -> Self {
        self.default_locale = locale;
        self
    }

    /// Active locale; defaults to the default locale
    #[must_use]
    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Include the catalogs compiled into this crate
    #[must_use]
    pub fn with_bundled(mut self) -> Self {
        self.include_bundled = true;
        self
    }

    /// Load `<dir>/<short-locale>/<namespace>.ftl` for every locale that has one
    #[must_use]
    pub fn locales_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.locales_dir = Some(dir.into());
        self
    }

    /// Add Fluent source text for `locale`
    #[must_use]
    pub fn add_source(mut self, locale: Locale, source: impl Into<String>) -> Self {
        self.sources.push((locale, source.into()));
        self
    }

    /// Parse every layer and build the catalog
    pub fn build(self) -> I18nResult<Catalog> {
        validate_namespace(&self.namespace)?;
        let mut bundles = BundleManager::new();

        if self.include_bundled {
            if self.namespace == BUNDLED_NAMESPACE {
                for locale in Locale::all() {
                    if let Some(source) = bundled_source(locale) {
                        let origin = format!("bundled {}", locale.resource_file(BUNDLED_NAMESPACE));
                        bundles.add_resource(locale, parse_resource(source.to_string(), &origin)?)?;
                    }
                }
            } else {
                warn!(
                    "No bundled catalogs for namespace '{}', only '{}' ships with the crate",
                    self.namespace, BUNDLED_NAMESPACE
                );
            }
        }

        if let Some(dir) = &self.locales_dir {
            let loader = ResourceLoader::new(dir, self.namespace.clone());
            for locale in Locale::all() {
                if loader.exists(locale) {
                    bundles.add_resource_overriding(locale, loader.load(locale)?)?;
                } else {
                    debug!("No catalog file {:?}", loader.path_for(locale));
                }
            }
        }

        for (locale, source) in self.sources {
            let origin = format!("inline source for {locale}");
            bundles.add_resource_overriding(locale, parse_resource(source, &origin)?)?;
        }

        let catalog = Catalog {
            locale: self.locale.unwrap_or(self.default_locale),
            default_locale: self.default_locale,
            namespace: self.namespace,
            bundles,
        };

        info!(
            "Built catalog '{}' for locale {} (default {}), loaded locales: {:?}",
            catalog.namespace,
            catalog.locale,
            catalog.default_locale,
            catalog.loaded_locales()
        );
        Ok(catalog)
    }
}

/// A namespace prefixes Fluent ids, so it must be a valid Fluent identifier.
pub(crate) fn validate_namespace(namespace: &str) -> I18nResult<()> {
    let mut chars = namespace.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(I18nError::InvalidNamespace(namespace.to_string()))
    }
}
