//! Error types for rate loading and conversion.

use thiserror::Error;

/// Errors raised while obtaining a rate snapshot from a provider.
///
/// Both variants carry a single user-visible message; callers surface it
/// as-is and never expose a partial rate table.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The network request did not complete successfully (connection
    /// failure, timeout, or a non-2xx HTTP status).
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider answered with a well-formed payload that signals a
    /// business error, or with data that violates rate table invariants.
    #[error("provider error: {0}")]
    Provider(String),
}

/// Errors raised by the conversion engine.
#[derive(Debug, Error, PartialEq)]
pub enum ConvertError {
    /// Currency code not present in the rate table. Selectors populated
    /// from the same table make this unreachable in normal operation.
    #[error("unknown currency: {0}")]
    UnknownCurrency(String),

    /// Amount input that is neither blank nor a finite number.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}
