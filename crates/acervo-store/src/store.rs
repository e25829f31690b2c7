//! The persistence seam.

use async_trait::async_trait;

use crate::models::{
    Cliente, ClienteComDocumentos, Documento, NovoCliente, NovoDocumento, ResumoDocumento,
};
use crate::StoreResult;

/// Persistence operations over client and document records.
///
/// Handlers hold this as `Arc<dyn Store>`; the production implementation is
/// [`SqliteStore`](crate::SqliteStore). Mutating operations report rows
/// affected so callers can distinguish "nothing matched" (a 404 for
/// update/delete, a silent no-op for duplicate-email creation) from a hard
/// failure.
#[async_trait]
pub trait Store: Send + Sync {
    /// Inserts a client. A duplicate e-mail is ignored: the call succeeds
    /// with 0 rows affected and the store is left unchanged.
    async fn criar_cliente(&self, novo: &NovoCliente) -> StoreResult<u64>;

    /// Returns every client.
    async fn listar_clientes(&self) -> StoreResult<Vec<Cliente>>;

    /// Finds a client by name, case-insensitively.
    async fn consultar_cliente(&self, nome: &str) -> StoreResult<Option<Cliente>>;

    /// Updates a client's name and e-mail; returns rows affected.
    async fn atualizar_cliente(&self, id: i64, nome: &str, email: &str) -> StoreResult<u64>;

    /// Deletes a client; its documents are removed by the cascade.
    /// Returns rows affected.
    async fn deletar_cliente(&self, id: i64) -> StoreResult<u64>;

    /// Inserts a document, stamping the processing instant; returns the
    /// assigned identifier.
    async fn criar_documento(&self, novo: &NovoDocumento) -> StoreResult<i64>;

    /// Returns every client joined with its document count.
    async fn listar_clientes_com_documentos(&self) -> StoreResult<Vec<ClienteComDocumentos>>;

    /// Returns the documents owned by a client.
    async fn listar_documentos_do_cliente(&self, cliente_id: i64) -> StoreResult<Vec<Documento>>;

    /// Returns the search projection (`titulo`, `data_processamento`,
    /// `tipo`) of a client's documents.
    async fn resumo_documentos_do_cliente(
        &self,
        cliente_id: i64,
    ) -> StoreResult<Vec<ResumoDocumento>>;
}
