use reqwest::StatusCode;
use thiserror::Error;

/// Errors that may occur while talking to the beacon node.
///
/// A 404 is not represented here; the absence of a resource is part of the
/// success domain and reported as `None` by the fetch methods.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure reaching the beacon node.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The beacon node answered with a non-2xx, non-404 status.
    #[error("unexpected status {status} fetching {path}")]
    Status {
        /// The response status code.
        status: StatusCode,
        /// The request path that produced it.
        path: String,
    },

    /// A 2xx response body did not decode as the expected document.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request path could not be joined onto the base URL.
    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
