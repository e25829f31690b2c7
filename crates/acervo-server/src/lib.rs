//! HTTP server, dispatch and route handlers for the acervo service.
//!
//! The server accepts connections on a Tokio listener, serves each one with
//! hyper, collects the request body under the configured size limit and
//! hands the normalized request to the exact-match router. Handlers
//! orchestrate the record store and the ingestion extractors and answer
//! through the response builder.

pub mod config;
pub mod handlers;
pub mod logging;
pub mod server;
pub mod shutdown;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use handlers::{build_router, RouteHandler};
pub use server::{dispatch, Server, ServerError};
pub use shutdown::{ConnectionTracker, ShutdownSignal};
pub use state::AppState;
