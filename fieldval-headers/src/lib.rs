//! # Typed HTTP Header Values
//!
//! fieldval has the opinion that header values should be strongly-typed,
//! because that's why we're using Rust in the first place. Every header
//! value is parsed into an immutable value, validated at construction,
//! and serialized back into canonical wire text through
//! [`Display`](std::fmt::Display).
//!
//! The crate is layered:
//!
//! - [`grammar`]: a position tracking [`Cursor`](grammar::Cursor) and the
//!   shared RFC 9110 grammar (tokens, quoted strings, parameters, lists).
//!   Failures are [`ParseError`](grammar::ParseError)s carrying byte offsets.
//! - [`specifier`]: the value types header values are built from, such as
//!   media types, codings, charsets, entity tags and ranges.
//! - typed headers ([`Accept`], [`ContentType`], [`ETag`], ...) implementing
//!   [`HeaderDecode`] and [`HeaderEncode`], usable directly or through
//!   [`HeaderMapExt`] on an [`http::HeaderMap`].
//! - [`dispatch`]: [`AnyHeader`] and the [`HeaderRegistry`], to decode
//!   values when the header name is only known at runtime.
//!
//! # Example
//!
//! ```
//! use fieldval_headers::{AcceptEncoding, HeaderMapExt};
//! use http::{HeaderMap, HeaderValue};
//!
//! let mut headers = HeaderMap::new();
//! headers.insert("accept-encoding", HeaderValue::from_static("gzip;q=0.5, br"));
//!
//! let accept = headers.typed_get::<AcceptEncoding>().unwrap();
//! assert_eq!(accept.to_string(), "gzip; q=0.5, br");
//! ```
//!
//! # Defining Custom Headers
//!
//! Implement [`TypedHeader`] to name the header, then [`HeaderDecode`]
//! and [`HeaderEncode`] (which uses the `Display` impl) for the value.
//!
//! ```
//! use fieldval_headers::{DecodeConfig, HeaderDecode, HeaderEncode, TypedHeader, ValueError};
//! use fieldval_headers::grammar::parse_token;
//! use http::HeaderName;
//! use std::fmt;
//!
//! static X_MODE: HeaderName = HeaderName::from_static("x-mode");
//!
//! struct XMode(String);
//!
//! impl TypedHeader for XMode {
//!     fn name() -> &'static HeaderName {
//!         &X_MODE
//!     }
//! }
//!
//! impl HeaderDecode for XMode {
//!     fn decode_text(text: &str, _config: &DecodeConfig) -> Result<Self, ValueError> {
//!         Ok(Self(parse_token(text)?.to_owned()))
//!     }
//! }
//!
//! impl fmt::Display for XMode {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         f.write_str(&self.0)
//!     }
//! }
//!
//! impl HeaderEncode for XMode {}
//!
//! assert_eq!(XMode::decode_str(" fast ").unwrap().0, "fast");
//! assert!(XMode::decode_str("fast lane").is_err());
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]
#![cfg_attr(test, allow(clippy::float_cmp))]
#![cfg_attr(not(test), warn(clippy::print_stdout, clippy::dbg_macro))]

#[macro_use]
mod util;

pub mod grammar;
pub mod specifier;

mod config;
#[doc(inline)]
pub use config::{DEFAULT_DECODE_CONFIG, DEFAULT_MAX_LIST_ITEMS, DecodeConfig};

mod error;
#[doc(inline)]
pub use error::{Error, QualityBound, ValueError};

mod header;
#[doc(inline)]
pub use header::{HeaderDecode, HeaderEncode, TypedHeader};

mod map_ext;
pub use self::map_ext::HeaderMapExt;

mod common;
pub use self::common::*;

pub mod dispatch;
#[doc(inline)]
pub use dispatch::{AnyHeader, AnyHeaderKind, HeaderRegistry};
