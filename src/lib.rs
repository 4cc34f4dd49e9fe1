//! ARK identifier resolution and the ANVL metadata format.
//!
//! This crate holds the text-processing core of an ARK registry client:
//! turning shorthand identifiers into fully-qualified ARKs, and moving
//! metadata records in and out of ANVL, CSV and JSON.
//!
//! # Overview
//!
//! ARKs have the structure:
//!
//! ```text
//! ark:/<naan>/<shoulder><blade>[/<extension>]
//! ```
//!
//! Users usually type only part of that. [`Ark::resolve`] fills in the
//! missing scheme, NAAN and shoulder from a [`BaseConfig`].
//!
//! # Quick Start
//!
//! ```rust
//! use ark_anvl::{Ark, BaseConfig, csv};
//!
//! let base = BaseConfig::new("99999", "fk4").unwrap();
//!
//! // Shorthand expands against the base
//! let ark = Ark::resolve(&base, "qc17z06").unwrap();
//! assert_eq!(ark.as_str(), "ark:/99999/fk4qc17z06");
//!
//! // Decode a registry response
//! let record = ark_anvl::anvl::decode(
//!     "erc.who: Quinn\nerc.what: The Eskimo,\n  really",
//!     Some(ark.as_str()),
//! ).unwrap();
//! assert_eq!(record.get("erc.what"), Some("The Eskimo, really"));
//!
//! // Project it into a CSV row
//! let row = csv::project_row(&record, &["ark", "erc.who", "erc.what"]);
//! assert_eq!(row, "ark:/99999/fk4qc17z06,Quinn,\"The Eskimo, really\"");
//!
//! // And back out as ANVL
//! assert_eq!(
//!     record.to_anvl(),
//!     "ark: ark%3A/99999/fk4qc17z06\nerc.what: The Eskimo, really\nerc.who: Quinn\n"
//! );
//! ```
//!
//! # Wire Format
//!
//! | Construct | Form |
//! |-----------|------|
//! | Element | `name: value` |
//! | Continuation | leading space or tab, joined with one space |
//! | Comment | leading `#` |
//! | Escapes | `%25`, `%3A`, `%0A`, `%0D` |
//! | Legacy | `+` decodes to a space |
//!
//! No checksum validation is applied to identifiers.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod anvl;
mod ark;
mod base;
mod constants;
pub mod csv;
mod error;
pub mod escape;
#[cfg(kani)]
mod kani_impls;
pub mod marshal;
pub mod prelude;

pub use anvl::AnvlRecord;
pub use ark::{Ark, ShoulderSource, resolve};
pub use base::BaseConfig;
pub use constants::{
    ARK_KEY, DEFAULT_NAAN, DEFAULT_SHOULDER, ERROR_KEY, MIN_SEGMENT_LENGTH, NAAN_LENGTH,
    RESERVED_CHARS, SCHEME, SCHEME_COMPACT, SUCCESS_KEY,
};
pub use csv::Columns;
pub use error::{
    ConfigError, IdentifierError, IdentifierErrorKind, MarshalError, ParseError, ParseErrorKind,
};
