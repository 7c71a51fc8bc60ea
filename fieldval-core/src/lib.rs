//! Core crate for fieldval.
//!
//! Houses the ambient pieces every other fieldval crate leans on:
//! the [`error`] utilities and the [`telemetry`] re-exports.

#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]
#![cfg_attr(not(test), warn(clippy::print_stdout, clippy::dbg_macro))]

pub mod error;
pub mod telemetry;
