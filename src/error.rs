use crate::models::InvalidProperty;
use thiserror::Error;

/// Why a call to the remote service produced no data.
///
/// These never reach callers: the HTTP client logs them and hands back
/// `None`, so every failure looks the same above the API boundary.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection, TLS, timeout or body read failure
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx HTTP status
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    /// 2xx response whose envelope carries `success: false`
    #[error("service reported failure")]
    Rejected,

    /// Body did not match the expected schema
    #[error("malformed payload: {0}")]
    Malformed(String),

    /// A listing decoded but failed its own checks
    #[error("invalid listing: {0}")]
    InvalidProperty(#[from] InvalidProperty),

    /// The request URL could not be built
    #[error("invalid request url: {0}")]
    Url(#[from] url::ParseError),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Malformed(err.to_string())
    }
}
