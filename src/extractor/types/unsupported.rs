use async_trait::async_trait;
use std::path::Path;

use crate::error::ExtractError;
use crate::extractor::TextSource;

/// Fallback handler for extensions no backend covers
pub struct UnsupportedFile {
    path: std::path::PathBuf,
    extension: Option<String>,
}

impl UnsupportedFile {
    pub fn new(path: std::path::PathBuf, extension: Option<String>) -> Self {
        Self { path, extension }
    }
}

#[async_trait]
impl TextSource for UnsupportedFile {
    async fn read_text_impl(&self) -> Result<String, ExtractError> {
        Err(ExtractError::Unsupported(
            self.extension
                .clone()
                .unwrap_or_else(|| "(no extension)".to_string()),
        ))
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    fn kind(&self) -> &'static str {
        "unsupported"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_unsupported_extraction_errors() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();
        std::fs::write(&path, "binary data").unwrap();

        let source = UnsupportedFile::new(path, Some("bin".to_string()));
        let err = source.read_text().await.unwrap_err();
        assert!(matches!(err, ExtractError::Unsupported(_)));
        assert!(err.is_benign());
    }
}
