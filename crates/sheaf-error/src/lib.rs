//! # Sheaf Error
//!
//! A coded error for the sheaf page store: a numeric code, positional
//! arguments, an optional cause, and a message formatted from the message
//! catalog only when it is read.
//!
//! ```rust
//! use sheaf_error::{CodedError, Catalog, Locale};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Catalog::builder("sheaf")
//!     .add_source(Locale::English, "sheaf-404 = resource { $arg0 } not found")
//!     .build()?;
//!
//! let error = CodedError::new(404).add("widget");
//! assert_eq!(error.code(), 404);
//! assert_eq!(error.try_message_with(&catalog)?, "resource widget not found");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! Messages read through [`CodedError::message`] or `Display` use the
//! process-wide catalog of [`sheaf_i18n::registry`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod coded;
pub mod defect;

pub use coded::{CodedError, Result};
pub use defect::MessageDefect;
pub use sheaf_i18n::{Argument, Catalog, Locale, MessageCatalog};
