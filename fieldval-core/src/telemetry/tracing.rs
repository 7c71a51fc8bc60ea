//! Tracing core rexport, for your convenience

#[doc(inline)]
pub use tracing::*;
