//! Conversion engine and in-memory history log.

/// Unit conversion constants and functions.
pub mod convert;
/// Bounded, deduplicating history log.
pub mod history;
