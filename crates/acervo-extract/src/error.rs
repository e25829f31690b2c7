//! Extraction error types.

use http::StatusCode;
use thiserror::Error;

/// Error produced while normalizing a request or parsing a multipart body.
///
/// Each variant maps to the HTTP status the dispatcher should answer with
/// via [`ExtractionError::status_code`]. The `Display` text is for logs;
/// client-facing bodies are written by the handlers, which never echo the
/// underlying detail.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The request declared `application/json` but the body does not parse.
    #[error("invalid JSON body: {0}")]
    InvalidJson(String),

    /// The query string does not decode as `key=value` pairs.
    #[error("invalid query string: {0}")]
    InvalidQuery(String),

    /// Multipart parsing was requested on a non-multipart body.
    #[error("request body is not multipart/form-data")]
    NotMultipart,

    /// The multipart Content-Type is missing a usable boundary.
    #[error("missing or invalid boundary in multipart Content-Type")]
    InvalidBoundary,

    /// The multipart stream itself is malformed.
    #[error("multipart parse error: {0}")]
    Multipart(String),

    /// A multipart field exceeds the configured size limit.
    #[error("multipart field too large: max {max} bytes, got {got}")]
    FieldTooLarge {
        /// Configured per-field limit in bytes.
        max: usize,
        /// Observed field size in bytes.
        got: usize,
    },
}

impl ExtractionError {
    /// Returns the HTTP status code this error should be answered with.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidJson(_)
            | Self::InvalidQuery(_)
            | Self::NotMultipart
            | Self::InvalidBoundary
            | Self::Multipart(_) => StatusCode::BAD_REQUEST,
            Self::FieldTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}
