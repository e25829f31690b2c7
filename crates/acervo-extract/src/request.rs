//! The normalized request.
//!
//! [`NormalizedRequest`] is the uniform view of an incoming HTTP request
//! that route handlers receive: decoded path, parsed query parameters and a
//! body already decoded according to its content type.

use std::collections::HashMap;

use bytes::Bytes;
use http::{header, HeaderMap, Method, Uri};
use serde::de::DeserializeOwned;

use crate::{ExtractionError, Multipart, MultipartLimits};

/// A request body decoded by content type.
#[derive(Debug, Clone)]
pub enum Body {
    /// `multipart/form-data`: the bytes are passed through unparsed.
    /// Multipart decoding owns the raw payload (see
    /// [`NormalizedRequest::multipart`]).
    Raw(Bytes),
    /// `application/json`: the parsed document.
    Json(serde_json::Value),
    /// Any other content type, including absent: the body as text.
    Text(String),
}

/// The normalized view of an incoming HTTP request.
///
/// Built once per request by the dispatcher, after the byte stream has been
/// fully collected (the server bounds collection with its configured maximum
/// body size). Malformed JSON surfaces as an [`ExtractionError`] from
/// [`NormalizedRequest::from_parts`]; it is the dispatcher's job to answer
/// 400, not this type's to swallow the failure.
///
/// # Example
///
/// ```rust
/// use acervo_extract::{Body, NormalizedRequest};
/// use bytes::Bytes;
/// use http::{HeaderMap, Method, Uri};
///
/// let req = NormalizedRequest::from_parts(
///     Method::GET,
///     &Uri::from_static("/clientes?nome=Ana"),
///     HeaderMap::new(),
///     Bytes::new(),
/// )
/// .unwrap();
///
/// assert_eq!(req.path(), "/clientes");
/// assert_eq!(req.query("nome"), Some("Ana"));
/// assert!(matches!(req.body(), Body::Text(t) if t.is_empty()));
/// ```
#[derive(Debug, Clone)]
pub struct NormalizedRequest {
    method: Method,
    path: String,
    query: HashMap<String, String>,
    headers: HeaderMap,
    body: Body,
}

impl NormalizedRequest {
    /// Normalizes a request from its already-collected parts.
    ///
    /// Body decoding policy:
    /// - `multipart/form-data` → [`Body::Raw`], untouched;
    /// - `application/json` → [`Body::Json`], parse failures propagate;
    /// - anything else → [`Body::Text`] via lossy UTF-8.
    pub fn from_parts(
        method: Method,
        uri: &Uri,
        headers: HeaderMap,
        bytes: Bytes,
    ) -> Result<Self, ExtractionError> {
        let query = match uri.query() {
            Some(q) => serde_urlencoded::from_str(q)
                .map_err(|e| ExtractionError::InvalidQuery(e.to_string()))?,
            None => HashMap::new(),
        };

        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        let body = if content_type.starts_with("multipart/form-data") {
            Body::Raw(bytes)
        } else if content_type.starts_with("application/json") {
            let value = serde_json::from_slice(&bytes)
                .map_err(|e| ExtractionError::InvalidJson(e.to_string()))?;
            Body::Json(value)
        } else {
            Body::Text(String::from_utf8_lossy(&bytes).into_owned())
        };

        Ok(Self {
            method,
            path: uri.path().to_string(),
            query,
            headers,
            body,
        })
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the decoded path, without the query string.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Looks up a query parameter by key.
    #[must_use]
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Returns the request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the decoded body.
    #[must_use]
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Deserializes a JSON body into `T`.
    ///
    /// Returns `None` when the body is not JSON or does not match `T`'s
    /// shape; handlers translate that into the route's own 400/404 answer.
    #[must_use]
    pub fn json<T: DeserializeOwned>(&self) -> Option<T> {
        match &self.body {
            Body::Json(value) => serde_json::from_value(value.clone()).ok(),
            _ => None,
        }
    }

    /// Starts multipart parsing over the raw body.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::NotMultipart`] when the body was not left
    /// raw by normalization, or [`ExtractionError::InvalidBoundary`] when
    /// the Content-Type lacks a usable boundary.
    pub fn multipart(&self, limits: MultipartLimits) -> Result<Multipart, ExtractionError> {
        match &self.body {
            Body::Raw(bytes) => Multipart::from_request(&self.headers, bytes.clone(), limits),
            _ => Err(ExtractionError::NotMultipart),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn headers_with_content_type(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, value.parse().unwrap());
        headers
    }

    #[test]
    fn test_path_and_query_split() {
        let req = NormalizedRequest::from_parts(
            Method::GET,
            &Uri::from_static("/clientes?nome=Ana&id=7"),
            HeaderMap::new(),
            Bytes::new(),
        )
        .unwrap();

        assert_eq!(req.path(), "/clientes");
        assert_eq!(req.query("nome"), Some("Ana"));
        assert_eq!(req.query("id"), Some("7"));
        assert_eq!(req.query("email"), None);
    }

    #[test]
    fn test_query_url_decoding() {
        let req = NormalizedRequest::from_parts(
            Method::GET,
            &Uri::from_static("/clientes?nome=Ana%20Maria"),
            HeaderMap::new(),
            Bytes::new(),
        )
        .unwrap();

        assert_eq!(req.query("nome"), Some("Ana Maria"));
    }

    #[test]
    fn test_json_body_is_parsed() {
        #[derive(Deserialize)]
        struct Payload {
            nome: String,
        }

        let req = NormalizedRequest::from_parts(
            Method::POST,
            &Uri::from_static("/clientes"),
            headers_with_content_type("application/json"),
            Bytes::from_static(br#"{"nome":"Ana"}"#),
        )
        .unwrap();

        assert!(matches!(req.body(), Body::Json(_)));
        let payload: Payload = req.json().unwrap();
        assert_eq!(payload.nome, "Ana");
    }

    #[test]
    fn test_json_with_charset_parameter() {
        let req = NormalizedRequest::from_parts(
            Method::POST,
            &Uri::from_static("/clientes"),
            headers_with_content_type("application/json; charset=utf-8"),
            Bytes::from_static(br#"{"ok":true}"#),
        )
        .unwrap();

        assert!(matches!(req.body(), Body::Json(_)));
    }

    #[test]
    fn test_malformed_json_propagates() {
        let result = NormalizedRequest::from_parts(
            Method::POST,
            &Uri::from_static("/clientes"),
            headers_with_content_type("application/json"),
            Bytes::from_static(b"{nome:"),
        );

        assert!(matches!(result, Err(ExtractionError::InvalidJson(_))));
    }

    #[test]
    fn test_multipart_body_left_raw() {
        let req = NormalizedRequest::from_parts(
            Method::POST,
            &Uri::from_static("/documentos/upload"),
            headers_with_content_type("multipart/form-data; boundary=xyz"),
            Bytes::from_static(b"--xyz--\r\n"),
        )
        .unwrap();

        assert!(matches!(req.body(), Body::Raw(b) if !b.is_empty()));
    }

    #[test]
    fn test_other_content_type_becomes_text() {
        let req = NormalizedRequest::from_parts(
            Method::POST,
            &Uri::from_static("/clientes"),
            headers_with_content_type("text/plain"),
            Bytes::from_static(b"ola"),
        )
        .unwrap();

        assert!(matches!(req.body(), Body::Text(t) if t == "ola"));
    }

    #[test]
    fn test_absent_content_type_becomes_text() {
        let req = NormalizedRequest::from_parts(
            Method::DELETE,
            &Uri::from_static("/clientes?id=1"),
            HeaderMap::new(),
            Bytes::new(),
        )
        .unwrap();

        assert!(matches!(req.body(), Body::Text(t) if t.is_empty()));
    }

    #[test]
    fn test_json_accessor_on_non_json_body() {
        #[derive(Deserialize)]
        struct Payload {
            #[allow(dead_code)]
            nome: String,
        }

        let req = NormalizedRequest::from_parts(
            Method::POST,
            &Uri::from_static("/clientes"),
            HeaderMap::new(),
            Bytes::from_static(br#"{"nome":"Ana"}"#),
        )
        .unwrap();

        // No application/json content type: body is text, accessor is None.
        assert!(req.json::<Payload>().is_none());
    }

    #[test]
    fn test_multipart_on_non_raw_body() {
        let req = NormalizedRequest::from_parts(
            Method::POST,
            &Uri::from_static("/documentos/upload"),
            HeaderMap::new(),
            Bytes::new(),
        )
        .unwrap();

        let result = req.multipart(MultipartLimits::default());
        assert!(matches!(result, Err(ExtractionError::NotMultipart)));
    }
}
