//! Text extraction for the acervo ingestion pipeline.
//!
//! Two extractors feed the document store:
//!
//! - [`extrair_texto_pdf`]: decodes a PDF already persisted to local
//!   storage and concatenates its page text;
//! - [`extrair_conteudo_url`]: fetches a remote page and reduces it to a
//!   title plus flattened body text.
//!
//! Both propagate failures as [`IngestError`]; the route handlers map any
//! of them to a 500 answer with a generic message, logging the cause.

mod error;
mod pdf;
mod url;

pub use error::IngestError;
pub use pdf::extrair_texto_pdf;
pub use url::{extrair_conteudo_url, PaginaExtraida};
