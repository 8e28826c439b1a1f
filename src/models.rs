use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One successfully extracted document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractedDoc {
    /// Path of the source document
    pub source: PathBuf,
    /// Path of the written text file
    pub output: PathBuf,
    /// Number of characters in the extracted text
    pub chars: usize,
}

impl ExtractedDoc {
    pub fn new(source: PathBuf, output: PathBuf, chars: usize) -> Self {
        Self {
            source,
            output,
            chars,
        }
    }
}

/// Outcome of a full extraction run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    /// Documents whose text was extracted and written out
    pub extracted: Vec<ExtractedDoc>,
    /// Files that could not be read as documents
    pub unreadable: Vec<PathBuf>,
    /// Files excluded by the extension filter
    pub filtered: usize,
}

impl RunReport {
    /// True when every candidate file was extracted
    pub fn is_clean(&self) -> bool {
        self.unreadable.is_empty()
    }
}
