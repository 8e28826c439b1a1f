use async_trait::async_trait;
use std::path::Path;

use crate::error::ExtractError;
use crate::extractor::TextSource;

/// PDF file handler: lopdf first, pdf-extract as the second decoder.
/// Scanned PDFs come back empty here and are picked up by the OCR fallback.
pub struct PdfFile {
    path: std::path::PathBuf,
    extension: Option<String>,
}

impl PdfFile {
    pub fn new(path: std::path::PathBuf, extension: Option<String>) -> Self {
        Self { path, extension }
    }
}

#[async_trait]
impl TextSource for PdfFile {
    async fn read_text_impl(&self) -> Result<String, ExtractError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || -> Result<String, ExtractError> {
            use lopdf::Document;

            let doc =
                Document::load(&path).map_err(|e| ExtractError::Pdf(e.to_string()))?;

            let mut text_content = String::new();
            for page_num in doc.get_pages().keys() {
                if let Ok(page_text) = doc.extract_text(&[*page_num]) {
                    text_content.push_str(&page_text);
                    text_content.push('\n');
                }
            }

            if text_content.trim().is_empty() {
                // Second decoder; if it also fails, return empty so the OCR
                // fallback gets its turn
                match pdf_extract::extract_text(&path) {
                    Ok(text) => Ok(text.trim().to_string()),
                    Err(_) => Ok(String::new()),
                }
            } else {
                Ok(text_content.trim().to_string())
            }
        })
        .await
        .map_err(|e| ExtractError::Other(anyhow::anyhow!("PDF task failed: {e}")))?
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    fn kind(&self) -> &'static str {
        "pdf"
    }
}
