//! Document routes: ingestion and listing.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use http::{Response, StatusCode};
use serde::Deserialize;

use acervo_extract::{MultipartLimits, NormalizedRequest, ResponseBuilder, UploadedFile};
use acervo_ingest::{extrair_conteudo_url, extrair_texto_pdf, IngestError};
use acervo_store::{NovoDocumento, Store};

use super::erro;
use crate::state::AppState;

/// POST /documentos/url body.
#[derive(Debug, Default, Deserialize)]
struct IngestaoUrl {
    url: Option<String>,
    cliente_id: Option<i64>,
}

/// POST /documentos/upload: ingests an uploaded PDF.
///
/// Multipart fields: `arquivo` (the PDF) and `client_id`. Validation runs
/// before any extraction: a missing or non-PDF file answers 400 without a
/// document row ever being created.
pub async fn enviar_documento(state: Arc<AppState>, req: NormalizedRequest) -> Response<Bytes> {
    let mut multipart = match req.multipart(MultipartLimits::default()) {
        Ok(multipart) => multipart,
        Err(e) => {
            tracing::debug!(error = %e, "upload is not a valid multipart request");
            return pdf_nao_enviado();
        }
    };

    let mut arquivo: Option<UploadedFile> = None;
    let mut client_id: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::debug!(error = %e, "malformed multipart upload");
                return pdf_nao_enviado();
            }
        };

        match field.name() {
            Some("arquivo") => match field.into_file().await {
                // Anything that is not a PDF is discarded here, before
                // extraction is ever attempted.
                Ok(file) if file.is_pdf() => arquivo = Some(file),
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(error = %e, "failed to read uploaded file");
                    return pdf_nao_enviado();
                }
            },
            Some("client_id") => client_id = field.text().await.ok(),
            _ => {
                // Unknown fields are drained and ignored.
                let _ = field.bytes().await;
            }
        }
    }

    let Some(arquivo) = arquivo else {
        return pdf_nao_enviado();
    };
    let Some(client_id) = client_id.filter(|v| !v.is_empty()) else {
        return ResponseBuilder::new()
            .status(StatusCode::BAD_REQUEST)
            .json(&erro("client_id não informado"));
    };
    let Ok(cliente_id) = client_id.parse::<i64>() else {
        tracing::error!(client_id = %client_id, "client_id is not numeric");
        return erro_processamento_pdf();
    };

    let texto = match extrair_upload(&state.upload_dir, arquivo.data().clone()).await {
        Ok(texto) => texto,
        Err(e) => {
            tracing::error!(error = %e, "failed to extract text from uploaded PDF");
            return erro_processamento_pdf();
        }
    };

    let novo = NovoDocumento {
        cliente_id,
        titulo: arquivo.file_name().unwrap_or("documento.pdf").to_string(),
        conteudo: Some(texto),
        tipo: "pdf".to_string(),
        url_origem: None,
    };

    match state.store.criar_documento(&novo).await {
        Ok(id) => ResponseBuilder::new().status(StatusCode::CREATED).json(
            &serde_json::json!({ "message": "PDF processado com sucesso", "id": id }),
        ),
        Err(e) => {
            tracing::error!(error = %e, cliente_id, "failed to persist uploaded document");
            erro_processamento_pdf()
        }
    }
}

/// POST /documentos/url: ingests the content behind a URL.
pub async fn ingerir_url(state: Arc<AppState>, req: NormalizedRequest) -> Response<Bytes> {
    let payload = req.json::<IngestaoUrl>().unwrap_or_default();

    let Some(url) = payload.url.filter(|u| !u.is_empty()) else {
        return ResponseBuilder::new()
            .status(StatusCode::BAD_REQUEST)
            .json(&erro("URL não fornecida"));
    };
    let Some(cliente_id) = payload.cliente_id else {
        return ResponseBuilder::new()
            .status(StatusCode::BAD_REQUEST)
            .json(&erro("cliente_id não informado"));
    };

    let pagina = match extrair_conteudo_url(&state.http, &url).await {
        Ok(pagina) => pagina,
        Err(e) => {
            tracing::error!(error = %e, url = %url, "failed to fetch URL content");
            return erro_processamento_url();
        }
    };

    let novo = NovoDocumento {
        cliente_id,
        titulo: pagina.titulo,
        conteudo: Some(pagina.conteudo),
        tipo: "url".to_string(),
        url_origem: Some(url),
    };

    match state.store.criar_documento(&novo).await {
        Ok(id) => ResponseBuilder::new().status(StatusCode::CREATED).json(
            &serde_json::json!({ "message": "URL processada com sucesso", "id": id }),
        ),
        Err(e) => {
            tracing::error!(error = %e, cliente_id, "failed to persist URL document");
            erro_processamento_url()
        }
    }
}

/// GET /documentos?cliente_id=: every document of a client.
pub async fn listar_do_cliente(state: Arc<AppState>, req: NormalizedRequest) -> Response<Bytes> {
    let Some(param) = req.query("cliente_id").filter(|v| !v.is_empty()) else {
        return ResponseBuilder::new()
            .status(StatusCode::BAD_REQUEST)
            .json(&erro("cliente_id não informado"));
    };

    let documentos = match param.parse::<i64>() {
        Ok(cliente_id) => match state.store.listar_documentos_do_cliente(cliente_id).await {
            Ok(documentos) => documentos,
            Err(e) => {
                tracing::error!(error = %e, cliente_id, "failed to list documents");
                return ResponseBuilder::new()
                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                    .json(&erro("Erro ao buscar documentos"));
            }
        },
        // A non-numeric id matches nothing, same as an unknown client.
        Err(_) => Vec::new(),
    };

    ResponseBuilder::new().json(&documentos)
}

/// GET /documentos/buscar?cliente_id=: title/date/kind projection.
pub async fn buscar_resumo(state: Arc<AppState>, req: NormalizedRequest) -> Response<Bytes> {
    let Some(param) = req.query("cliente_id").filter(|v| !v.is_empty()) else {
        return ResponseBuilder::new()
            .status(StatusCode::BAD_REQUEST)
            .json(&erro("cliente_id não informado"));
    };

    let resumos = match param.parse::<i64>() {
        Ok(cliente_id) => match state.store.resumo_documentos_do_cliente(cliente_id).await {
            Ok(resumos) => resumos,
            Err(e) => {
                tracing::error!(error = %e, cliente_id, "failed to search documents");
                Vec::new()
            }
        },
        Err(_) => Vec::new(),
    };

    if resumos.is_empty() {
        ResponseBuilder::new()
            .status(StatusCode::NOT_FOUND)
            .json(&erro("Nenhum documento encontrado"))
    } else {
        ResponseBuilder::new().json(&resumos)
    }
}

/// Writes the upload to a scoped temp file under `upload_dir` and extracts
/// its text. The file is removed as soon as extraction finishes.
async fn extrair_upload(upload_dir: &Path, data: Bytes) -> Result<String, IngestError> {
    tokio::fs::create_dir_all(upload_dir).await?;
    let dir = upload_dir.to_path_buf();

    tokio::task::spawn_blocking(move || {
        let mut temporario = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(".pdf")
            .tempfile_in(dir)?;
        temporario.write_all(&data)?;
        temporario.flush()?;
        extrair_texto_pdf(temporario.path())
    })
    .await
    .map_err(|e| IngestError::Pdf(format!("extraction task failed: {e}")))?
}

fn pdf_nao_enviado() -> Response<Bytes> {
    ResponseBuilder::new()
        .status(StatusCode::BAD_REQUEST)
        .json(&erro("PDF não enviado"))
}

fn erro_processamento_pdf() -> Response<Bytes> {
    ResponseBuilder::new()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .json(&erro("Erro ao processar PDF"))
}

fn erro_processamento_url() -> Response<Bytes> {
    ResponseBuilder::new()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .json(&erro("Erro ao processar URL"))
}
