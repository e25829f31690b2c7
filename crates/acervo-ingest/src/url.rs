//! Remote page content extraction.

use scraper::{Html, Selector};
use url::Url;

use crate::IngestError;

/// Title and flattened body text extracted from a remote page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginaExtraida {
    /// Page title: `<title>` text, first `<h1>` text or the URL itself.
    pub titulo: String,
    /// Visible body text with whitespace collapsed to single spaces.
    pub conteudo: String,
}

/// Fetches `url_raw` and extracts its title and body text.
///
/// The URL must be absolute with an http/https scheme; the response must
/// carry a success status and an HTML content type. Title selection falls
/// back from `<title>` to the first `<h1>` to the literal URL; body text is
/// every text node under `<body>`, consecutive whitespace (newlines
/// included) collapsed to single spaces, trimmed.
///
/// # Errors
///
/// Network failures, non-success statuses, non-HTML responses and invalid
/// URLs all propagate as [`IngestError`].
pub async fn extrair_conteudo_url(
    http: &reqwest::Client,
    url_raw: &str,
) -> Result<PaginaExtraida, IngestError> {
    let url = Url::parse(url_raw).map_err(|e| IngestError::InvalidUrl(e.to_string()))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(IngestError::InvalidUrl(format!(
            "unsupported scheme: {}",
            url.scheme()
        )));
    }

    let resposta = http.get(url).send().await?.error_for_status()?;

    let content_type = resposta
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    if !content_type.to_lowercase().starts_with("text/html") {
        return Err(IngestError::NotHtml(content_type));
    }

    let html = resposta.text().await?;
    Ok(extrair_da_html(&html, url_raw))
}

/// Reduces an HTML document to the stored title/content pair.
fn extrair_da_html(html: &str, url_raw: &str) -> PaginaExtraida {
    let documento = Html::parse_document(html);

    let titulo_sel = Selector::parse("title").unwrap();
    let h1_sel = Selector::parse("h1").unwrap();
    let body_sel = Selector::parse("body").unwrap();

    let texto_de = |elemento: scraper::ElementRef<'_>| -> String {
        elemento.text().collect::<String>().trim().to_string()
    };

    let titulo = documento
        .select(&titulo_sel)
        .next()
        .map(texto_de)
        .filter(|t| !t.is_empty())
        .or_else(|| {
            documento
                .select(&h1_sel)
                .next()
                .map(texto_de)
                .filter(|t| !t.is_empty())
        })
        .unwrap_or_else(|| url_raw.to_string());

    let conteudo = documento
        .select(&body_sel)
        .flat_map(|body| body.text())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    PaginaExtraida { titulo, conteudo }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titulo_vem_do_elemento_title() {
        let pagina = extrair_da_html(
            "<html><head><title>Minha Página</title></head><body><h1>Outro</h1></body></html>",
            "https://example.com",
        );
        assert_eq!(pagina.titulo, "Minha Página");
    }

    #[test]
    fn test_titulo_cai_para_h1() {
        let pagina = extrair_da_html(
            "<html><head><title>  </title></head><body><h1>Cabeçalho</h1></body></html>",
            "https://example.com",
        );
        assert_eq!(pagina.titulo, "Cabeçalho");
    }

    #[test]
    fn test_titulo_cai_para_url() {
        let pagina = extrair_da_html(
            "<html><body><p>sem título</p></body></html>",
            "https://example.com/pagina",
        );
        assert_eq!(pagina.titulo, "https://example.com/pagina");
    }

    #[test]
    fn test_conteudo_colapsa_espacos() {
        let pagina = extrair_da_html(
            "<html><body><p>um\n  dois</p>\n\n<p>três</p></body></html>",
            "https://example.com",
        );
        assert_eq!(pagina.conteudo, "um dois três");
    }

    #[test]
    fn test_conteudo_vazio_para_body_vazio() {
        let pagina = extrair_da_html("<html><body></body></html>", "https://example.com");
        assert_eq!(pagina.conteudo, "");
    }

    #[tokio::test]
    async fn test_esquema_nao_http_rejeitado() {
        let http = reqwest::Client::new();
        let err = extrair_conteudo_url(&http, "ftp://example.com/arquivo")
            .await
            .unwrap_err();
        assert!(matches!(err, IngestError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_url_relativa_rejeitada() {
        let http = reqwest::Client::new();
        let err = extrair_conteudo_url(&http, "/caminho/relativo").await.unwrap_err();
        assert!(matches!(err, IngestError::InvalidUrl(_)));
    }
}
