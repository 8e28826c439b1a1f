use async_trait::async_trait;

use crate::error::ExtractError;

/// Trait for extracting raw text from one file
#[async_trait]
pub trait TextSource: Send + Sync {
    /// Extract text from the file (internal implementation)
    async fn read_text_impl(&self) -> Result<String, ExtractError>;

    /// Extract text from the file (public API with size check)
    async fn read_text(&self) -> Result<String, ExtractError> {
        // Zero-byte files short-circuit without invoking a backend
        match tokio::fs::metadata(self.path()).await {
            Ok(metadata) => {
                if metadata.len() == 0 {
                    return Ok(String::new());
                }
            }
            Err(_) => {
                // Can't get metadata, try to read anyway
            }
        }

        self.read_text_impl().await
    }

    /// Get the file path
    fn path(&self) -> &std::path::Path;

    /// Get the file extension
    fn extension(&self) -> Option<&str>;

    /// Name of the backend, for logging
    fn kind(&self) -> &'static str;
}
