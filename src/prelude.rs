//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use ark_anvl::prelude::*;
//!
//! let ark = Ark::resolve(&BaseConfig::default(), "fk4qc17z06").unwrap();
//! assert_eq!(ark.as_str(), "ark:/99999/fk4qc17z06");
//! ```

pub use crate::{
    // Core types
    AnvlRecord, Ark, BaseConfig, Columns, ShoulderSource,
    // Errors
    ConfigError, IdentifierError, IdentifierErrorKind, MarshalError, ParseError, ParseErrorKind,
    // Constants
    ARK_KEY, DEFAULT_NAAN, DEFAULT_SHOULDER, SCHEME,
};
