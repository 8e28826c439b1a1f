use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::constants::{IMAGE_EXTENSIONS, TEXT_EXTENSIONS};
use crate::extractor::types::{
    CsvFile, DocFile, DocxFile, ImageFile, PdfFile, PlainTextFile, UnsupportedFile,
};
use crate::extractor::TextSource;
use crate::ocr::OcrEngine;

/// Factory for creating TextSource instances based on file extension
pub struct SourceFactory {
    ocr: OcrEngine,
    antiword: PathBuf,
}

impl SourceFactory {
    pub fn new(ocr: OcrEngine, antiword: PathBuf) -> Self {
        Self { ocr, antiword }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            OcrEngine::new(&config.tools, &config.ocr),
            config.tools.antiword_path(),
        )
    }

    /// Create a TextSource from path and extension
    pub fn create(&self, path: PathBuf, extension: Option<String>) -> Arc<dyn TextSource> {
        let ext_lower = extension.as_ref().map(|s| s.to_lowercase());

        match ext_lower.as_deref() {
            Some(ext) if TEXT_EXTENSIONS.contains(&ext) => {
                Arc::new(PlainTextFile::new(path, extension))
            }
            Some("pdf") => Arc::new(PdfFile::new(path, extension)),
            Some("docx") => Arc::new(DocxFile::new(path, extension)),
            Some("doc") => Arc::new(DocFile::new(path, extension, self.antiword.clone())),
            Some("csv") => Arc::new(CsvFile::new(path, extension)),
            Some(ext) if IMAGE_EXTENSIONS.contains(&ext) => {
                Arc::new(ImageFile::new(path, extension, self.ocr.clone()))
            }
            _ => Arc::new(UnsupportedFile::new(path, extension)),
        }
    }
}
