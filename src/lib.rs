pub mod config;
pub mod constants;
pub mod error;
pub mod extractor;
pub mod language;
pub mod logging;
pub mod models;
pub mod ocr;
pub mod pipeline;
pub mod text;
pub mod utils;

pub use config::Config;
pub use error::ExtractError;
pub use extractor::{SourceFactory, TextSource};
pub use language::LanguageGate;
pub use models::{ExtractedDoc, RunReport};
pub use ocr::OcrEngine;
pub use pipeline::{ExtractOptions, ExtractRunner};
