//! Telemetry re-exports used by fieldval.

pub mod tracing;
