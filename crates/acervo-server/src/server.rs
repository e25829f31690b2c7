//! The HTTP server and request dispatch.
//!
//! Built on hyper and Tokio: a TCP accept loop spawns one task per
//! connection, each request's body is collected under the configured size
//! limit, and the normalized request is dispatched through the exact-match
//! router. Unmatched routes answer 404 with a plain-text body.

use std::convert::Infallible;
use std::sync::Arc;

use bytes::Bytes;
use http::{HeaderMap, Method, Response, StatusCode, Uri};
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use thiserror::Error;
use tokio::net::TcpListener;

use acervo_extract::{NormalizedRequest, ResponseBuilder};
use acervo_router::Router;

use crate::config::ServerConfig;
use crate::handlers::RouteHandler;
use crate::shutdown::{ConnectionTracker, ShutdownSignal};

/// Server error.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configured address could not be bound.
    #[error("failed to bind: {0}")]
    Bind(String),
}

/// The acervo HTTP server.
///
/// # Example
///
/// ```rust,ignore
/// let state = Arc::new(AppState::new(store, config.upload_dir().to_path_buf()));
/// let router = build_router(&state);
/// Server::new(config, router).run().await?;
/// ```
pub struct Server {
    config: ServerConfig,
    router: Router<RouteHandler>,
}

impl Server {
    /// Creates a server over an already-built router.
    #[must_use]
    pub fn new(config: ServerConfig, router: Router<RouteHandler>) -> Self {
        Self { config, router }
    }

    /// Runs the server until SIGTERM or SIGINT.
    pub async fn run(self) -> Result<(), ServerError> {
        let shutdown = ShutdownSignal::with_os_signals();
        self.run_with_shutdown(shutdown).await
    }

    /// Runs the server with a caller-controlled shutdown signal.
    pub async fn run_with_shutdown(self, shutdown: ShutdownSignal) -> Result<(), ServerError> {
        let addr = self.config.socket_addr().map_err(|e| {
            ServerError::Bind(format!("invalid address '{}': {}", self.config.http_addr(), e))
        })?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind(format!("failed to bind to {addr}: {e}")))?;

        tracing::info!("server listening on {}", addr);

        let server = Arc::new(self);
        let tracker = ConnectionTracker::new();

        loop {
            tokio::select! {
                result = listener.accept() => {
                    match result {
                        Ok((stream, remote_addr)) => {
                            let server = Arc::clone(&server);
                            let token = tracker.acquire();
                            let shutdown_clone = shutdown.clone();

                            tokio::spawn(async move {
                                if let Err(e) = server.handle_connection(stream, shutdown_clone).await {
                                    tracing::error!("connection error from {}: {}", remote_addr, e);
                                }
                                drop(token);
                            });
                        }
                        Err(e) => {
                            tracing::error!("failed to accept connection: {}", e);
                        }
                    }
                }

                _ = shutdown.recv() => {
                    tracing::info!("shutdown signal received, stopping server");
                    break;
                }
            }
        }

        let drain_timeout = server.config.shutdown_timeout();
        tracing::info!(
            "waiting up to {:?} for {} connections to close",
            drain_timeout,
            tracker.active_connections()
        );

        tokio::select! {
            _ = tracker.wait_for_idle() => {
                tracing::info!("all connections closed");
            }
            _ = tokio::time::sleep(drain_timeout) => {
                tracing::warn!(
                    "shutdown timeout reached, {} connections still active",
                    tracker.active_connections()
                );
            }
        }

        tracing::info!("server stopped");
        Ok(())
    }

    async fn handle_connection(
        self: &Arc<Self>,
        stream: tokio::net::TcpStream,
        shutdown: ShutdownSignal,
    ) -> Result<(), hyper::Error> {
        let io = TokioIo::new(stream);
        let server = Arc::clone(self);

        let service = service_fn(move |req: hyper::Request<Incoming>| {
            let server = Arc::clone(&server);
            async move { server.handle_request(req).await }
        });

        let conn = http1::Builder::new().serve_connection(io, service);

        tokio::select! {
            result = conn => result,
            _ = shutdown.recv() => Ok(()),
        }
    }

    async fn handle_request(
        self: &Arc<Self>,
        req: hyper::Request<Incoming>,
    ) -> Result<Response<Full<Bytes>>, Infallible> {
        let (parts, body) = req.into_parts();
        tracing::debug!("{} {}", parts.method, parts.uri);

        let limited = Limited::new(body, self.config.max_body_size());
        let bytes = match limited.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) if e.is::<LengthLimitError>() => {
                tracing::warn!(
                    max = self.config.max_body_size(),
                    "request body over the configured limit"
                );
                let response = ResponseBuilder::new()
                    .status(StatusCode::PAYLOAD_TOO_LARGE)
                    .json(&serde_json::json!({
                        "error": "Corpo da requisição excede o tamanho máximo"
                    }));
                return Ok(to_full(response));
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to read request body");
                let response = ResponseBuilder::new()
                    .status(StatusCode::BAD_REQUEST)
                    .json(&serde_json::json!({
                        "error": "Falha ao ler o corpo da requisição"
                    }));
                return Ok(to_full(response));
            }
        };

        let response = dispatch(&self.router, parts.method, parts.uri, parts.headers, bytes).await;
        Ok(to_full(response))
    }
}

/// Normalizes a collected request and routes it to its handler.
///
/// Normalization failures (malformed JSON above all) answer 400 with a
/// generic body; unmatched `(method, path)` pairs answer 404 with the
/// plain-text not-found body.
pub async fn dispatch(
    router: &Router<RouteHandler>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response<Bytes> {
    let req = match NormalizedRequest::from_parts(method, &uri, headers, body) {
        Ok(req) => req,
        Err(e) => {
            tracing::debug!(error = %e, "request normalization failed");
            return ResponseBuilder::new()
                .status(e.status_code())
                .json(&serde_json::json!({ "error": "Requisição inválida" }));
        }
    };

    let Some(handler) = router.find(req.method(), req.path()) else {
        return ResponseBuilder::new()
            .status(StatusCode::NOT_FOUND)
            .end("Não encontrada.");
    };

    handler.as_ref()(req).await
}

fn to_full(response: Response<Bytes>) -> Response<Full<Bytes>> {
    response.map(Full::new)
}
