use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::config::{OcrConfig, ToolsConfig};
use crate::error::ExtractError;

/// Subprocess OCR engine wrapping tesseract, with pdftoppm rasterization for
/// image-only PDFs. All methods are blocking; callers run them inside
/// `spawn_blocking`.
#[derive(Debug, Clone)]
pub struct OcrEngine {
    tesseract: PathBuf,
    pdftoppm: PathBuf,
    lang: Option<String>,
    dpi: u32,
}

impl OcrEngine {
    pub fn new(tools: &ToolsConfig, ocr: &OcrConfig) -> Self {
        Self {
            tesseract: tools.tesseract_path(),
            pdftoppm: tools.pdftoppm_path(),
            lang: ocr.lang.clone(),
            dpi: ocr.dpi,
        }
    }

    pub fn with_lang(mut self, lang: Option<String>) -> Self {
        self.lang = lang;
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Check that tesseract responds; used to warn up front rather than fail
    /// per file.
    pub fn is_available(&self) -> bool {
        Command::new(&self.tesseract)
            .arg("--version")
            .output()
            .is_ok()
    }

    /// Check that pdftoppm responds (needed only for PDF inputs).
    pub fn pdftoppm_available(&self) -> bool {
        Command::new(&self.pdftoppm).arg("-v").output().is_ok()
    }

    /// OCR a single raster image.
    ///
    /// Tesseract appends `.txt` to its output base name, so the temp file is
    /// created with that suffix and the suffix-less base is passed on the
    /// command line.
    pub fn ocr_image(&self, image: &Path) -> Result<String, ExtractError> {
        let image = std::fs::canonicalize(image)?; // tesseract needs absolute paths
        let out_file = tempfile::Builder::new()
            .prefix("docsift-ocr-")
            .suffix(".txt")
            .tempfile()?;
        let out_path = out_file.path().to_path_buf();
        let out_base = out_path.with_extension("");

        let mut cmd = Command::new(&self.tesseract);
        cmd.arg(&image).arg(&out_base);
        if let Some(lang) = &self.lang {
            cmd.arg("-l").arg(lang);
        }

        let output = cmd.output().map_err(|e| self.spawn_error("tesseract", &self.tesseract, e))?;
        if !output.status.success() {
            return Err(ExtractError::ToolFailed {
                tool: "tesseract",
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(std::fs::read_to_string(&out_path)?)
    }

    /// OCR an image-only PDF: rasterize every page with pdftoppm, OCR the
    /// pages in order, concatenate.
    pub fn ocr_pdf(&self, pdf: &Path) -> Result<String, ExtractError> {
        let temp_dir = tempfile::tempdir()?;
        let output_prefix = temp_dir.path().join("page");

        debug!(
            "rasterizing {} at {} dpi for OCR",
            pdf.display(),
            self.dpi
        );

        let output = Command::new(&self.pdftoppm)
            .arg("-png")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg(pdf)
            .arg(&output_prefix)
            .output()
            .map_err(|e| self.spawn_error("pdftoppm", &self.pdftoppm, e))?;
        if !output.status.success() {
            return Err(ExtractError::ToolFailed {
                tool: "pdftoppm",
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let mut pages: Vec<PathBuf> = std::fs::read_dir(temp_dir.path())?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .collect();
        pages.sort();

        let mut contents = Vec::with_capacity(pages.len());
        for (idx, page) in pages.iter().enumerate() {
            debug!("OCR page {}/{}", idx + 1, pages.len());
            contents.push(self.ocr_image(page)?);
        }

        Ok(contents.join("\n"))
    }

    fn spawn_error(&self, tool: &'static str, path: &Path, err: std::io::Error) -> ExtractError {
        if err.kind() == ErrorKind::NotFound {
            ExtractError::ToolMissing {
                tool,
                path: path.display().to_string(),
            }
        } else {
            ExtractError::Io(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_tools() -> OcrEngine {
        let tools = ToolsConfig {
            tesseract: "/nonexistent/docsift/tesseract".to_string(),
            pdftoppm: "/nonexistent/docsift/pdftoppm".to_string(),
            antiword: "/nonexistent/docsift/antiword".to_string(),
        };
        OcrEngine::new(&tools, &OcrConfig::default())
    }

    #[test]
    fn test_is_available_false_for_missing_tool() {
        let engine = missing_tools();
        assert!(!engine.is_available());
        assert!(!engine.pdftoppm_available());
    }

    #[test]
    fn test_ocr_image_reports_missing_tool() {
        let engine = missing_tools();
        let image = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        let err = engine.ocr_image(image.path()).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::ToolMissing {
                tool: "tesseract",
                ..
            }
        ));
    }

    #[test]
    fn test_ocr_pdf_reports_missing_tool() {
        let engine = missing_tools();
        let pdf = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        let err = engine.ocr_pdf(pdf.path()).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::ToolMissing {
                tool: "pdftoppm",
                ..
            }
        ));
    }

    #[test]
    fn test_builders() {
        let engine = missing_tools()
            .with_lang(Some("fra".to_string()))
            .with_dpi(150);
        assert_eq!(engine.lang.as_deref(), Some("fra"));
        assert_eq!(engine.dpi, 150);
    }
}
