//! Error types for the jobflow API client.
//!
//! # Design
//! A non-success status is not an error: it yields a `Response` whose
//! `parsed` is `None`. Errors are reserved for requests that could not be
//! built, exchanges that failed at the transport layer, and success bodies
//! that do not decode. `UnexpectedStatus` only comes out of
//! `Response::error_for_status`, for callers that opt in.

use thiserror::Error;

/// Errors returned by request building, transports and response parsing.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Base URL plus path template did not form a valid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The blocking transport failed (connect, TLS, timeout, I/O).
    #[error("transport error: {0}")]
    Transport(#[from] ureq::Error),

    /// The non-blocking transport failed (connect, TLS, timeout, I/O).
    #[error("transport error: {0}")]
    AsyncTransport(#[from] reqwest::Error),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// A success response body could not be decoded into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The server answered with a status that carries no parsed value.
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// Client configuration from the environment was invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}
