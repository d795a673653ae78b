//! # Sheaf I18n
//!
//! Message catalogs for coded errors, built on the Fluent localization
//! system.
//!
//! A catalog maps the decimal string of an error code to a Fluent template
//! whose placeholders are positional: the first argument attached to an error
//! is `$arg0`, the second `$arg1`, and so on. This crate provides:
//!
//! - Locale parsing and detection
//! - Catalog file loading, plus the `sheaf` catalogs compiled into the crate
//! - Placeholder checking and positional formatting
//! - Default-locale fallback for missing translations
//! - A process-wide catalog with atomic replacement
//!
//! # Example
//!
//! ```rust
//! use sheaf_i18n::{Argument, Catalog, Locale, MessageCatalog};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Catalog::builder("sheaf")
//!     .add_source(Locale::English, "sheaf-404 = resource { $arg0 } not found")
//!     .build()?;
//!
//! let message = catalog.format("404", &[Argument::from("widget")])?;
//! assert_eq!(message.as_deref(), Some("resource widget not found"));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod argument;
pub mod bundle;
pub mod catalog;
pub mod config;
pub mod error;
pub mod locale;
pub mod registry;
pub mod resource;

pub use argument::Argument;
pub use bundle::BundleManager;
pub use catalog::{Catalog, CatalogBuilder, MessageCatalog};
pub use config::CatalogConfig;
pub use error::{FormatDefect, I18nError, I18nResult};
pub use locale::Locale;
pub use resource::{ResourceLoader, BUNDLED_NAMESPACE};
