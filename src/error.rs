use thiserror::Error;

/// Errors produced while extracting text from a single document.
///
/// The benign subset covers files that simply are not extractable documents;
/// in tolerant mode those are skipped, and even strict runs do not abort on
/// them. Everything else (missing tools, subprocess failures, IO) points at
/// the environment rather than the file and aborts strict runs.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("unsupported file type: {0}")]
    Unsupported(String),

    #[error("no text extractable from the file")]
    NoText,

    #[error("language check rejected the text ({lang}, confidence {confidence:.2})")]
    LanguageRejected { lang: String, confidence: f64 },

    #[error("{tool} not found at {path}")]
    ToolMissing { tool: &'static str, path: String },

    #[error("{tool} failed: {stderr}")]
    ToolFailed { tool: &'static str, stderr: String },

    #[error("PDF decode error: {0}")]
    Pdf(String),

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("CSV decode error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ExtractError {
    /// True for "this file is not a readable document" failures.
    pub fn is_benign(&self) -> bool {
        matches!(
            self,
            ExtractError::Unsupported(_)
                | ExtractError::NoText
                | ExtractError::LanguageRejected { .. }
                | ExtractError::Pdf(_)
                | ExtractError::Archive(_)
                | ExtractError::Csv(_)
        )
    }
}
