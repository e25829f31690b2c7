//! Ingestion error types.

use thiserror::Error;

/// Failure while extracting document content.
///
/// Every variant is terminal for its request: the handlers translate any
/// of them into a 500 with a generic message and log the detail here;
/// the text below never reaches a client.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The PDF could not be decoded (corrupt, encrypted or unsupported).
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    /// The input string is not an absolute http/https URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The remote fetch failed (connection, DNS, non-success status).
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The remote server answered with something other than HTML.
    #[error("response is not HTML (content-type: {0})")]
    NotHtml(String),

    /// Local file handling around extraction failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
