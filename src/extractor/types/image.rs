use async_trait::async_trait;
use std::path::Path;

use crate::error::ExtractError;
use crate::extractor::TextSource;
use crate::ocr::OcrEngine;

/// Raster image handler: there is no text layer to read, so extraction goes
/// straight through the OCR engine.
pub struct ImageFile {
    path: std::path::PathBuf,
    extension: Option<String>,
    ocr: OcrEngine,
}

impl ImageFile {
    pub fn new(path: std::path::PathBuf, extension: Option<String>, ocr: OcrEngine) -> Self {
        Self {
            path,
            extension,
            ocr,
        }
    }
}

#[async_trait]
impl TextSource for ImageFile {
    async fn read_text_impl(&self) -> Result<String, ExtractError> {
        let path = self.path.clone();
        let ocr = self.ocr.clone();
        tokio::task::spawn_blocking(move || ocr.ocr_image(&path))
            .await
            .map_err(|e| ExtractError::Other(anyhow::anyhow!("OCR task failed: {e}")))?
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    fn kind(&self) -> &'static str {
        "image"
    }
}
