//! Error types

use thiserror::Error;

use crate::Side;

/// Core error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("Invalid order data (price {price:?}, quantity {quantity:?}): {reason}")]
    InvalidOrderData {
        price: String,
        quantity: String,
        reason: String,
    },

    #[error("Reference price must be positive and finite, got {0}")]
    InvalidReferencePrice(f64),

    #[error("Order book has no {side} levels")]
    EmptyBook { side: Side },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CoreError {
    pub(crate) fn invalid_order(
        price: impl ToString,
        quantity: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        CoreError::InvalidOrderData {
            price: price.to_string(),
            quantity: quantity.to_string(),
            reason: reason.into(),
        }
    }
}

/// Reasons a single venue could not produce a snapshot.
///
/// Always contained at the venue boundary: the orchestrator records it as a
/// diagnostic and leaves the venue out of the merge.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Venue API error {code}: {message}")]
    Api { code: String, message: String },

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Order book has no {0} levels")]
    EmptyBook(Side),

    #[error(transparent)]
    InvalidOrderData(CoreError),

    #[error("Fetch task aborted: {0}")]
    Aborted(String),
}

impl From<CoreError> for FetchError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptyBook { side } => FetchError::EmptyBook(side),
            other => FetchError::InvalidOrderData(other),
        }
    }
}

/// Result type alias
pub type CoreResult<T> = Result<T, CoreError>;
pub type FetchResult<T> = Result<T, FetchError>;
