//! The response builder.

use bytes::Bytes;
use http::{header, Response, StatusCode};
use serde::Serialize;

/// Fluent builder for the two response shapes the service emits.
///
/// `status` chains; `json` and `end` are terminals that consume the builder
/// and produce the finished [`Response`]. Taking `self` by value means a
/// handler cannot terminate the same response twice: the hazard is ruled
/// out by ownership rather than by convention.
///
/// # Example
///
/// ```rust
/// use acervo_extract::ResponseBuilder;
/// use http::StatusCode;
/// use serde_json::json;
///
/// let response = ResponseBuilder::new()
///     .status(StatusCode::CREATED)
///     .json(&json!({"message": "Cliente cadastrado."}));
///
/// assert_eq!(response.status(), StatusCode::CREATED);
/// ```
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    status: StatusCode,
}

impl Default for ResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseBuilder {
    /// Creates a builder with status 200 OK.
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
        }
    }

    /// Sets the HTTP status, returning the builder for chaining.
    #[must_use]
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Ends the response with a JSON body.
    ///
    /// Sets `Content-Type: application/json` and serializes `value`.
    ///
    /// # Panics
    ///
    /// Panics if JSON serialization fails; the service only serializes its
    /// own response types.
    #[must_use]
    pub fn json<T: Serialize>(self, value: &T) -> Response<Bytes> {
        let body = serde_json::to_vec(value).expect("JSON serialization failed");

        Response::builder()
            .status(self.status)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Bytes::from(body))
            .expect("Failed to build response")
    }

    /// Ends the response with a literal plain-text body, no serialization.
    #[must_use]
    pub fn end(self, body: impl Into<String>) -> Response<Bytes> {
        Response::builder()
            .status(self.status)
            .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(Bytes::from(body.into()))
            .expect("Failed to build response")
    }
}
