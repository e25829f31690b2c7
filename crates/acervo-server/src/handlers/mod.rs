//! Route handlers and route registration.
//!
//! Handlers are async functions over `(Arc<AppState>, NormalizedRequest)`;
//! [`build_router`] boxes them into the exact-match router the dispatcher
//! consults. Response bodies, including every Portuguese client-facing
//! message, live here, next to the routes that emit them.

pub mod clientes;
pub mod documentos;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http::Response;

use acervo_extract::NormalizedRequest;
use acervo_router::Router;

use crate::state::AppState;

/// Boxed future returned by a route handler.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Response<Bytes>> + Send>>;

/// A registered route handler.
pub type RouteHandler = Arc<dyn Fn(NormalizedRequest) -> HandlerFuture + Send + Sync>;

/// Registers every route of the service.
#[must_use]
pub fn build_router(state: &Arc<AppState>) -> Router<RouteHandler> {
    let mut router = Router::new();

    router.post("/clientes", rota(state, clientes::criar_cliente));
    router.get("/clientes", rota(state, clientes::consultar_clientes));
    router.put("/clientes", rota(state, clientes::atualizar_cliente));
    router.delete("/clientes", rota(state, clientes::deletar_cliente));
    router.get(
        "/clientes/documentos",
        rota(state, clientes::listar_com_documentos),
    );

    router.post(
        "/documentos/upload",
        rota(state, documentos::enviar_documento),
    );
    router.post("/documentos/url", rota(state, documentos::ingerir_url));
    router.get("/documentos", rota(state, documentos::listar_do_cliente));
    router.get("/documentos/buscar", rota(state, documentos::buscar_resumo));

    router
}

/// Binds a handler function to the shared state.
fn rota<F, Fut>(state: &Arc<AppState>, handler: F) -> RouteHandler
where
    F: Fn(Arc<AppState>, NormalizedRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response<Bytes>> + Send + 'static,
{
    let state = Arc::clone(state);
    Arc::new(move |req| -> HandlerFuture { Box::pin(handler(Arc::clone(&state), req)) })
}

/// `{"error": …}` body.
pub(crate) fn erro(mensagem: &str) -> serde_json::Value {
    serde_json::json!({ "error": mensagem })
}

/// `{"message": …}` body.
pub(crate) fn mensagem(texto: &str) -> serde_json::Value {
    serde_json::json!({ "message": texto })
}
