//! Shared handler state.

use std::path::PathBuf;
use std::sync::Arc;

use acervo_store::Store;

/// Dependencies every route handler receives.
///
/// The store is held behind the [`Store`] trait so tests can substitute an
/// in-memory database or a failing double; the HTTP client is shared so
/// URL ingestions reuse its connection pool.
pub struct AppState {
    /// The record store.
    pub store: Arc<dyn Store>,
    /// Outbound HTTP client for URL ingestion.
    pub http: reqwest::Client,
    /// Directory for upload scratch files.
    pub upload_dir: PathBuf,
}

impl AppState {
    /// Creates the handler state with a fresh HTTP client.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, upload_dir: PathBuf) -> Self {
        Self {
            store,
            http: reqwest::Client::new(),
            upload_dir,
        }
    }
}
