//! utilities crate for fieldval
//!
//! `fieldval-utils` contains utilities used by `fieldval`,
//! not really being part of one of the other crates, or used
//! by plenty of other crates.

#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]
#![cfg_attr(test, allow(clippy::float_cmp))]
#![cfg_attr(not(test), warn(clippy::print_stdout, clippy::dbg_macro))]

#[doc(hidden)]
#[macro_use]
pub mod macros;

pub mod collections;
