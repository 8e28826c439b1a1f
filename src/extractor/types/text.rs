use async_trait::async_trait;
use std::path::Path;

use crate::error::ExtractError;
use crate::extractor::TextSource;

/// Plain text / markdown handler
pub struct PlainTextFile {
    path: std::path::PathBuf,
    extension: Option<String>,
}

impl PlainTextFile {
    pub fn new(path: std::path::PathBuf, extension: Option<String>) -> Self {
        Self { path, extension }
    }
}

#[async_trait]
impl TextSource for PlainTextFile {
    async fn read_text_impl(&self) -> Result<String, ExtractError> {
        // Lossy decoding: stray bytes in otherwise-textual files should not
        // sink the whole document
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    fn kind(&self) -> &'static str {
        "text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_plain_text_extraction() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();
        std::fs::write(&path, "Hello, plain text!").unwrap();

        let source = PlainTextFile::new(path.clone(), Some("txt".to_string()));
        let text = source.read_text().await.unwrap();
        assert_eq!(text, "Hello, plain text!");
        assert_eq!(source.path(), path);
    }

    #[tokio::test]
    async fn test_empty_file_short_circuits() {
        let temp_file = NamedTempFile::new().unwrap();
        let source =
            PlainTextFile::new(temp_file.path().to_path_buf(), Some("txt".to_string()));
        let text = source.read_text().await.unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_lossy() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();
        std::fs::write(&path, [b'o', b'k', 0xff, b'!']).unwrap();

        let source = PlainTextFile::new(path, Some("txt".to_string()));
        let text = source.read_text().await.unwrap();
        assert!(text.starts_with("ok"));
        assert!(text.ends_with('!'));
    }
}
