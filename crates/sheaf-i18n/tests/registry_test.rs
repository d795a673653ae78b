//! Integration tests for the process-wide catalog.
//!
//! The registry is global, so everything runs in a single test.

use anyhow::Result;
use sheaf_i18n::{registry, Argument, Catalog, CatalogConfig, Locale, MessageCatalog};

#[test]
fn test_registry_lifecycle() -> Result<()> {
    // First use holds the bundled catalog
    let initial = registry::current();
    assert_eq!(initial.namespace(), "sheaf");
    assert!(initial.has_key("101"));

    // Installing is seen by the next snapshot, earlier snapshots are unaffected
    let replacement = Catalog::builder("sheaf")
        .add_source(Locale::English, "sheaf-404 = resource { $arg0 } not found\n")
        .build()?;
    let previous = registry::install(replacement);
    assert!(previous.has_key("101"));
    assert!(initial.has_key("101"));

    let current = registry::current();
    assert!(!current.has_key("101"));
    assert_eq!(
        current.format("404", &[Argument::from("widget")])?.as_deref(),
        Some("resource widget not found")
    );

    // Configuration driven install
    let config = CatalogConfig {
        locale: Some(Locale::German),
        ..CatalogConfig::default()
    };
    registry::init_from_config(&config)?;
    let current = registry::current();
    assert_eq!(current.locale(), Locale::German);
    assert_eq!(
        current.format("105", &[Argument::from("a.db")])?.as_deref(),
        Some("Die Datei a.db kann nicht geschlossen werden.")
    );

    registry::reset();
    assert!(registry::current().has_key("101"));
    Ok(())
}
