//! Client and document records over SQLite.
//!
//! The [`Store`] trait is the persistence seam the route handlers depend
//! on: handlers receive it as an injected `Arc<dyn Store>`, so tests can
//! substitute an in-memory database or a failing double. [`SqliteStore`]
//! is the production implementation over a `sqlx` pool.
//!
//! Record fields keep the service's domain language (`nome`, `email`,
//! `data_cadastro`, …): they are simultaneously the column names and the
//! wire format, so serde and row mapping need no renaming layer.

mod error;
mod models;
mod sqlite;
mod store;

pub use error::{StoreError, StoreResult};
pub use models::{
    Cliente, ClienteComDocumentos, Documento, NovoCliente, NovoDocumento, ResumoDocumento,
};
pub use sqlite::{connect, connect_in_memory, init_schema, SqliteStore};
pub use store::Store;
