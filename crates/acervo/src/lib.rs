//! # Acervo
//!
//! Client and document management service: CRUD over two related records
//! backed by SQLite, with ingestion of document content from uploaded PDF
//! files or remote URLs.
//!
//! This crate is the facade: it re-exports the member crates and ships the
//! `acervo` binary that wires configuration, logging, the store and the
//! HTTP server together.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use acervo::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     let pool = acervo::store::connect(config.database_path()).await?;
//!     acervo::store::init_schema(&pool).await?;
//!
//!     let state = Arc::new(AppState::new(
//!         Arc::new(SqliteStore::new(pool)),
//!         config.upload_dir().to_path_buf(),
//!     ));
//!     let router = build_router(&state);
//!     Server::new(config, router).run().await?;
//!     Ok(())
//! }
//! ```

// Re-export the routing registry.
pub use acervo_router as router;

// Re-export request/response adaptation.
pub use acervo_extract as extract;

// Re-export the record store.
pub use acervo_store as store;

// Re-export the ingestion extractors.
pub use acervo_ingest as ingest;

// Re-export the server.
pub use acervo_server as server;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use acervo_extract::{Body, NormalizedRequest, ResponseBuilder};
    pub use acervo_ingest::{extrair_conteudo_url, extrair_texto_pdf, IngestError};
    pub use acervo_router::Router;
    pub use acervo_server::{
        build_router, dispatch, AppState, Server, ServerConfig, ShutdownSignal,
    };
    pub use acervo_store::{
        Cliente, Documento, NovoCliente, NovoDocumento, SqliteStore, Store,
    };
}
