//! PDF text extraction.

use std::path::Path;

use crate::IngestError;

/// Extracts the text of a PDF persisted at `path`.
///
/// Pages are decoded in document order; the text runs of a page are joined
/// with single spaces and every page is terminated with a newline, so the
/// result reads one page per line. No OCR, no layout reconstruction.
///
/// # Errors
///
/// Any decode failure (corrupt file, encrypted document, unsupported
/// structure) surfaces as [`IngestError::Pdf`].
pub fn extrair_texto_pdf(path: &Path) -> Result<String, IngestError> {
    let paginas =
        pdf_extract::extract_text_by_pages(path).map_err(|e| IngestError::Pdf(e.to_string()))?;

    let mut texto = String::new();
    for pagina in &paginas {
        let runs: Vec<&str> = pagina.split_whitespace().collect();
        texto.push_str(&runs.join(" "));
        texto.push('\n');
    }

    Ok(texto)
}
