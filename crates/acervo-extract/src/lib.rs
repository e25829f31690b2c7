//! Request normalization and response building for the acervo HTTP service.
//!
//! This crate adapts the raw HTTP exchange into the shapes the route
//! handlers work with:
//!
//! - [`NormalizedRequest`]: decoded path, parsed query parameters and a
//!   content-type-aware [`Body`];
//! - [`ResponseBuilder`]: fluent status selection with consuming `json`
//!   and `end` terminals;
//! - [`Multipart`]: `multipart/form-data` parsing for the upload route.

mod error;
mod multipart;
mod request;
mod response;

pub use error::ExtractionError;
pub use multipart::{Field, Multipart, MultipartLimits, UploadedFile};
pub use request::{Body, NormalizedRequest};
pub use response::ResponseBuilder;
