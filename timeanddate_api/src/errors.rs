//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A caller-supplied filter was missing or invalid. Raised before any
    /// network activity takes place.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// An HTTP request failed (network error, timeout, or unreadable response).
    #[error("Request failed")]
    RequestFailed,
    /// The service returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The service answered at the HTTP level but the payload reports an
    /// application error (bad credentials, invalid parameter combination,
    /// exceeded quota).
    #[error("Service reported an error: {message}")]
    Service { code: Option<i32>, message: String },
    /// The payload passed error validation but could not be parsed into the
    /// expected element structure.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}
