use async_trait::async_trait;
use std::path::Path;

use crate::error::ExtractError;
use crate::extractor::TextSource;

/// CSV handler: fields joined with spaces, records with newlines
pub struct CsvFile {
    path: std::path::PathBuf,
    extension: Option<String>,
}

impl CsvFile {
    pub fn new(path: std::path::PathBuf, extension: Option<String>) -> Self {
        Self { path, extension }
    }
}

#[async_trait]
impl TextSource for CsvFile {
    async fn read_text_impl(&self) -> Result<String, ExtractError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || -> Result<String, ExtractError> {
            let mut reader = csv::ReaderBuilder::new()
                .has_headers(false)
                .flexible(true)
                .from_path(&path)?;

            let mut out = String::new();
            for result in reader.records() {
                let record = result?;
                out.push_str(&record.iter().collect::<Vec<_>>().join(" "));
                out.push('\n');
            }

            Ok(out.trim().to_string())
        })
        .await
        .map_err(|e| ExtractError::Other(anyhow::anyhow!("CSV task failed: {e}")))?
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    fn kind(&self) -> &'static str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_csv_extraction() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();
        std::fs::write(&path, "name,age\nJohn,30\nJane,25").unwrap();

        let source = CsvFile::new(path, Some("csv".to_string()));
        let text = source.read_text().await.unwrap();
        assert_eq!(text, "name age\nJohn 30\nJane 25");
    }

    #[tokio::test]
    async fn test_ragged_rows_are_accepted() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();
        std::fs::write(&path, "a,b,c\nd,e").unwrap();

        let source = CsvFile::new(path, Some("csv".to_string()));
        let text = source.read_text().await.unwrap();
        assert_eq!(text, "a b c\nd e");
    }
}
