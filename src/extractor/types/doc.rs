use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::ExtractError;
use crate::extractor::TextSource;

/// Legacy `.doc` handler: shells out to antiword and captures stdout.
/// antiword has no standard install location, so the binary path comes from
/// configuration.
pub struct DocFile {
    path: PathBuf,
    extension: Option<String>,
    antiword: PathBuf,
}

impl DocFile {
    pub fn new(path: PathBuf, extension: Option<String>, antiword: PathBuf) -> Self {
        Self {
            path,
            extension,
            antiword,
        }
    }
}

#[async_trait]
impl TextSource for DocFile {
    async fn read_text_impl(&self) -> Result<String, ExtractError> {
        let path = self.path.clone();
        let antiword = self.antiword.clone();
        tokio::task::spawn_blocking(move || -> Result<String, ExtractError> {
            let output = Command::new(&antiword).arg(&path).output().map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    ExtractError::ToolMissing {
                        tool: "antiword",
                        path: antiword.display().to_string(),
                    }
                } else {
                    ExtractError::Io(e)
                }
            })?;

            if !output.status.success() {
                return Err(ExtractError::ToolFailed {
                    tool: "antiword",
                    stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                });
            }

            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        })
        .await
        .map_err(|e| ExtractError::Other(anyhow::anyhow!("DOC task failed: {e}")))?
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    fn kind(&self) -> &'static str {
        "doc"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_missing_antiword_is_reported() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();
        std::fs::write(&path, "stub doc body").unwrap();

        let source = DocFile::new(
            path,
            Some("doc".to_string()),
            PathBuf::from("/nonexistent/docsift/antiword"),
        );
        let err = source.read_text().await.unwrap_err();
        assert!(matches!(
            err,
            ExtractError::ToolMissing {
                tool: "antiword",
                ..
            }
        ));
        assert!(!err.is_benign());
    }
}
