//! The process-wide catalog
//!
//! Errors that are not given a catalog explicitly format against the catalog
//! held here. On first use it holds [`Catalog::bundled`]; applications that
//! ship their own catalogs call [`install`] or [`init_from_config`] at startup.
//! Readers take a snapshot per lookup, so an installed catalog is seen by the
//! next message read.

use crate::catalog::{Catalog, MessageCatalog};
use crate::config::CatalogConfig;
use crate::error::I18nResult;
use crate::resource::BUNDLED_NAMESPACE;
use arc_swap::ArcSwap;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::{error, info};

static CATALOG: Lazy<ArcSwap<Catalog>> = Lazy::new(|| ArcSwap::from_pointee(default_catalog()));

fn default_catalog() -> Catalog {
    Catalog::bundled().unwrap_or_else(|e| {
        error!("Failed to load bundled catalog, messages fall back to codes: {}", e);
        Catalog::empty(BUNDLED_NAMESPACE)
    })
}

/// Snapshot of the current process catalog
pub fn current() -> Arc<Catalog> {
    CATALOG.load_full()
}

/// Replace the process catalog, returning the previous one
pub fn install(catalog: Catalog) -> Arc<Catalog> {
    info!("Installing catalog for namespace '{}'", catalog.namespace());
    CATALOG.swap(Arc::new(catalog))
}

/// Build a catalog from `config` and install it
pub fn init_from_config(config: &CatalogConfig) -> I18nResult<()> {
    install(Catalog::from_config(config)?);
    Ok(())
}

/// Reinstall the bundled catalog
pub fn reset() {
    install(default_catalog());
}
