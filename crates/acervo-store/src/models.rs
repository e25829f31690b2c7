//! Record types.

use serde::{Deserialize, Serialize};

/// A client record as stored and as serialized on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cliente {
    /// Auto-assigned identifier.
    pub id: i64,
    /// Client name; compared case-insensitively by the store.
    pub nome: String,
    /// Globally unique e-mail address.
    pub email: String,
    /// Registration date, free-form text supplied at creation.
    pub data_cadastro: String,
}

/// Input for client creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NovoCliente {
    /// Client name.
    pub nome: String,
    /// E-mail address; a duplicate makes the insert a silent no-op.
    pub email: String,
    /// Registration date.
    pub data_cadastro: String,
}

/// A document record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Documento {
    /// Auto-assigned identifier.
    pub id: i64,
    /// Owning client; deleting the client cascades onto this record.
    pub cliente_id: i64,
    /// Document title (file name for uploads, page title for URLs).
    pub titulo: String,
    /// Extracted body text, when extraction produced any.
    pub conteudo: Option<String>,
    /// Processing instant, RFC 3339.
    pub data_processamento: String,
    /// Document kind: `pdf`, `url`, `fiscal` or another free-form tag.
    pub tipo: String,
    /// Source URL, populated only for `url`-type documents.
    pub url_origem: Option<String>,
}

/// Input for document creation. Documents are immutable once ingested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NovoDocumento {
    /// Owning client identifier.
    pub cliente_id: i64,
    /// Document title.
    pub titulo: String,
    /// Extracted body text.
    pub conteudo: Option<String>,
    /// Document kind.
    pub tipo: String,
    /// Source URL for `url`-type documents.
    pub url_origem: Option<String>,
}

/// A client joined with its document count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClienteComDocumentos {
    /// Client identifier.
    pub id: i64,
    /// Client name.
    pub nome: String,
    /// E-mail address.
    pub email: String,
    /// Registration date.
    pub data_cadastro: String,
    /// Number of documents owned by this client.
    pub total_documentos: i64,
}

/// The projection served by the document search route: title, processing
/// date and kind, nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumoDocumento {
    /// Document title.
    pub titulo: String,
    /// Processing instant.
    pub data_processamento: String,
    /// Document kind.
    pub tipo: String,
}
