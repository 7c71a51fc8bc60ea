//! Error utilities for fieldval and its users.
//!
//! See [`fieldval_error`] for the full documentation.

#[doc(inline)]
pub use fieldval_error::*;
