//! Client routes.

use std::sync::Arc;

use bytes::Bytes;
use http::{Response, StatusCode};
use serde::Deserialize;

use acervo_extract::{NormalizedRequest, ResponseBuilder};
use acervo_store::{NovoCliente, Store};

use super::{erro, mensagem};
use crate::state::AppState;

/// PUT body: name and e-mail are the only mutable fields.
#[derive(Debug, Deserialize)]
struct AtualizacaoCliente {
    nome: String,
    email: String,
}

/// POST /clientes: registers a client.
///
/// A duplicate e-mail is a silent no-op in the store and still answers 201.
pub async fn criar_cliente(state: Arc<AppState>, req: NormalizedRequest) -> Response<Bytes> {
    let Some(novo) = req.json::<NovoCliente>() else {
        return ResponseBuilder::new()
            .status(StatusCode::BAD_REQUEST)
            .json(&erro("Erro ao cadastrar cliente"));
    };

    match state.store.criar_cliente(&novo).await {
        Ok(_) => ResponseBuilder::new()
            .status(StatusCode::CREATED)
            .json(&mensagem("Cliente cadastrado.")),
        Err(e) => {
            tracing::error!(error = %e, "failed to create client");
            ResponseBuilder::new()
                .status(StatusCode::BAD_REQUEST)
                .json(&erro("Erro ao cadastrar cliente"))
        }
    }
}

/// GET /clientes: one client by `nome`, or every client.
pub async fn consultar_clientes(state: Arc<AppState>, req: NormalizedRequest) -> Response<Bytes> {
    if let Some(nome) = req.query("nome").filter(|n| !n.is_empty()) {
        return match state.store.consultar_cliente(nome).await {
            Ok(Some(cliente)) => ResponseBuilder::new().json(&cliente),
            Ok(None) => ResponseBuilder::new()
                .status(StatusCode::NOT_FOUND)
                .json(&erro("Cliente não encontrado.")),
            Err(e) => {
                tracing::error!(error = %e, nome, "failed to look up client");
                ResponseBuilder::new()
                    .status(StatusCode::NOT_FOUND)
                    .json(&erro("Cliente não encontrado."))
            }
        };
    }

    match state.store.listar_clientes().await {
        Ok(clientes) if !clientes.is_empty() => ResponseBuilder::new().json(&clientes),
        Ok(_) => ResponseBuilder::new()
            .status(StatusCode::NOT_FOUND)
            .json(&erro("Clientes não encontrados.")),
        Err(e) => {
            tracing::error!(error = %e, "failed to list clients");
            ResponseBuilder::new()
                .status(StatusCode::NOT_FOUND)
                .json(&erro("Clientes não encontrados."))
        }
    }
}

/// PUT /clientes?id=: updates a client's name and e-mail.
pub async fn atualizar_cliente(state: Arc<AppState>, req: NormalizedRequest) -> Response<Bytes> {
    let id = req.query("id").and_then(|v| v.parse::<i64>().ok());
    let payload = req.json::<AtualizacaoCliente>();

    let (Some(id), Some(payload)) = (id, payload) else {
        return nao_encontrado();
    };

    match state
        .store
        .atualizar_cliente(id, &payload.nome, &payload.email)
        .await
    {
        Ok(alterados) if alterados > 0 => {
            ResponseBuilder::new().json(&mensagem("Cliente atualizado com sucesso"))
        }
        Ok(_) => nao_encontrado(),
        Err(e) => {
            tracing::error!(error = %e, id, "failed to update client");
            nao_encontrado()
        }
    }
}

/// DELETE /clientes?id=: deletes a client; documents go with it.
pub async fn deletar_cliente(state: Arc<AppState>, req: NormalizedRequest) -> Response<Bytes> {
    let Some(id) = req.query("id").and_then(|v| v.parse::<i64>().ok()) else {
        return nao_encontrado();
    };

    match state.store.deletar_cliente(id).await {
        Ok(removidos) if removidos > 0 => {
            ResponseBuilder::new().json(&mensagem("Cliente deletado com sucesso"))
        }
        Ok(_) => nao_encontrado(),
        Err(e) => {
            tracing::error!(error = %e, id, "failed to delete client");
            nao_encontrado()
        }
    }
}

/// GET /clientes/documentos: every client with its document count.
pub async fn listar_com_documentos(
    state: Arc<AppState>,
    _req: NormalizedRequest,
) -> Response<Bytes> {
    match state.store.listar_clientes_com_documentos().await {
        Ok(clientes) => ResponseBuilder::new().json(&clientes),
        Err(e) => {
            tracing::error!(error = %e, "failed to list clients with document counts");
            ResponseBuilder::new()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .json(&erro("Erro ao buscar clientes"))
        }
    }
}

fn nao_encontrado() -> Response<Bytes> {
    ResponseBuilder::new()
        .status(StatusCode::NOT_FOUND)
        .json(&erro("Cliente não encontrado"))
}
