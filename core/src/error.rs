//! Error types for the todolist API clients.
//!
//! # Design
//! The remote service reports most failures inside a 200 response: the
//! envelope carries a non-zero `resultCode` and human-readable `messages`.
//! Those land in `Business`. Everything that prevents a usable envelope from
//! arriving (transport failure, non-2xx status, undecodable body) is a
//! network-kind error and is reported through its `Display` text.

use thiserror::Error;

use crate::types::ResultCode;

/// Errors returned by the API clients and transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Valid envelope with a non-success result code.
    #[error("{}", .messages.first().map(String::as_str).unwrap_or("business failure"))]
    Business {
        result_code: ResultCode,
        messages: Vec<String>,
    },

    /// The server answered with a non-2xx status.
    #[error("Request failed with status code {status}")]
    HttpError { status: u16, body: String },

    /// No response was received.
    #[error("{0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl ApiError {
    /// Whether this is a server-side business failure rather than a
    /// network-kind error.
    pub fn is_business(&self) -> bool {
        matches!(self, ApiError::Business { .. })
    }
}

/// Errors raised while loading [`ClientConfig`](crate::config::ClientConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is not a valid number of seconds: {value}")]
    InvalidTimeout { name: &'static str, value: String },

    #[error("base URL must start with http:// or https://, got {0}")]
    InvalidBaseUrl(String),
}
