//! fieldval: typed HTTP header field values.
//!
//! Every header value is parsed into a strongly-typed, immutable value that
//! is validated at construction and serializes back to canonical wire text.
//! Parse failures report the byte offset they happened at, and value errors
//! name the header (or parameter) and the text that was rejected.
//!
//! This crate bundles the fieldval crates:
//!
//! | module | crate | contents |
//! |-|-|-|
//! | [`headers`] | `fieldval-headers` | grammar, value types, typed headers, dynamic dispatch |
//! | [`error`] | `fieldval-error` | error context and source chain utilities |
//! | [`telemetry`] | `fieldval-core` | the `tracing` facade used for diagnostics |
//! | [`utils`] | `fieldval-utils` | the non-empty collection and enum macros |
//!
//! # Example
//!
//! ```
//! use fieldval::error::ErrorContext;
//! use fieldval::headers::{AnyHeader, HeaderRegistry};
//!
//! let registry = HeaderRegistry::new();
//!
//! let header = registry
//!     .decode("Accept-Language", "en-US,en;q=0.5")
//!     .unwrap()
//!     .unwrap();
//! assert!(matches!(header, AnyHeader::AcceptLanguage(_)));
//! assert_eq!(header.to_string(), "en-US, en; q=0.5");
//!
//! let err = registry
//!     .decode("accept-encoding", "*; q=ABC")
//!     .context("decode request headers")
//!     .unwrap_err();
//! assert!(err.to_string().starts_with("decode request headers"));
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), warn(clippy::print_stdout, clippy::dbg_macro))]

#[doc(inline)]
pub use fieldval_core::error;

#[doc(inline)]
pub use fieldval_core::telemetry;

pub mod headers {
    //! Typed HTTP header values.
    //!
    //! See [`fieldval_headers`] for the full documentation.

    #[doc(inline)]
    pub use fieldval_headers::*;
}

pub mod utils {
    //! Utilities shared by the fieldval crates.

    #[doc(inline)]
    pub use fieldval_utils::collections;
}
