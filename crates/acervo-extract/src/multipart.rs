//! Multipart form data parsing for the upload route.
//!
//! The upload endpoint receives `multipart/form-data` with a file field
//! (`arquivo`) and a text field (`client_id`). Parsing runs over the raw
//! bytes the normalizer passed through untouched.

use std::io;

use bytes::Bytes;
use http::{header, HeaderMap};

use crate::ExtractionError;

/// Default maximum size per field (10 MB), sized for the PDFs the service
/// actually receives.
pub const DEFAULT_MAX_FIELD_SIZE: usize = 10 * 1024 * 1024;

/// Size limits applied while reading multipart fields.
#[derive(Debug, Clone, Copy)]
pub struct MultipartLimits {
    /// Maximum size per field in bytes.
    pub max_field_size: usize,
}

impl Default for MultipartLimits {
    fn default() -> Self {
        Self {
            max_field_size: DEFAULT_MAX_FIELD_SIZE,
        }
    }
}

/// Iterator-style reader over the fields of a multipart body.
///
/// # Example
///
/// ```rust,ignore
/// let mut multipart = req.multipart(MultipartLimits::default())?;
/// while let Some(field) = multipart.next_field().await? {
///     match field.name() {
///         Some("arquivo") => { /* file field */ }
///         Some("client_id") => { /* text field */ }
///         _ => {}
///     }
/// }
/// ```
pub struct Multipart {
    inner: multer::Multipart<'static>,
    limits: MultipartLimits,
}

impl Multipart {
    /// Creates a multipart reader from the request headers and raw body.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::InvalidBoundary`] when the Content-Type
    /// header is absent or carries no usable boundary.
    pub fn from_request(
        headers: &HeaderMap,
        body: Bytes,
        limits: MultipartLimits,
    ) -> Result<Self, ExtractionError> {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .ok_or(ExtractionError::InvalidBoundary)?;

        let boundary =
            multer::parse_boundary(content_type).map_err(|_| ExtractionError::InvalidBoundary)?;

        let stream = futures_util::stream::once(async move { Ok::<_, io::Error>(body) });

        Ok(Self {
            inner: multer::Multipart::new(stream, boundary),
            limits,
        })
    }

    /// Returns the next field, or `None` when the body is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error when the multipart stream is malformed.
    pub async fn next_field(&mut self) -> Result<Option<Field>, ExtractionError> {
        match self.inner.next_field().await {
            Ok(Some(field)) => Ok(Some(Field::new(field, self.limits.max_field_size))),
            Ok(None) => Ok(None),
            Err(e) => Err(ExtractionError::Multipart(e.to_string())),
        }
    }
}

impl std::fmt::Debug for Multipart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Multipart")
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}

/// A single field from a multipart form: a plain value or a file.
pub struct Field {
    inner: multer::Field<'static>,
    max_size: usize,
}

impl Field {
    fn new(inner: multer::Field<'static>, max_size: usize) -> Self {
        Self { inner, max_size }
    }

    /// The form field name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.inner.name()
    }

    /// The original file name, present only for file fields.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.inner.file_name()
    }

    /// The declared MIME type of the field.
    #[must_use]
    pub fn content_type(&self) -> Option<&mime::Mime> {
        self.inner.content_type()
    }

    /// Reads the whole field as bytes, bounded by the field size limit.
    pub async fn bytes(self) -> Result<Bytes, ExtractionError> {
        let max_size = self.max_size;
        let bytes = self
            .inner
            .bytes()
            .await
            .map_err(|e| ExtractionError::Multipart(e.to_string()))?;

        if bytes.len() > max_size {
            return Err(ExtractionError::FieldTooLarge {
                max: max_size,
                got: bytes.len(),
            });
        }

        Ok(bytes)
    }

    /// Reads the field as a UTF-8 string.
    pub async fn text(self) -> Result<String, ExtractionError> {
        let bytes = self.bytes().await?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| ExtractionError::Multipart(format!("field is not valid UTF-8: {e}")))
    }

    /// Reads the field into an [`UploadedFile`].
    pub async fn into_file(self) -> Result<UploadedFile, ExtractionError> {
        let file_name = self.file_name().map(String::from);
        let content_type = self.content_type().map(ToString::to_string);
        let data = self.bytes().await?;

        Ok(UploadedFile {
            file_name,
            content_type,
            data,
        })
    }
}

impl std::fmt::Debug for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.inner.name())
            .field("file_name", &self.inner.file_name())
            .finish_non_exhaustive()
    }
}

/// A file received through a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    file_name: Option<String>,
    content_type: Option<String>,
    data: Bytes,
}

impl UploadedFile {
    /// The original file name sent by the client.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// The declared MIME type.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// The file content.
    #[must_use]
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Whether the client declared this file as a PDF.
    ///
    /// The upload route accepts nothing else; files failing this check are
    /// discarded before any extraction is attempted.
    #[must_use]
    pub fn is_pdf(&self) -> bool {
        self.content_type.as_deref() == Some("application/pdf")
    }
}
