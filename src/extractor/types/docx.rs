use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Read;
use std::path::Path;

use crate::error::ExtractError;
use crate::extractor::TextSource;

static PARAGRAPH_BREAKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</w:p>|<w:br\s*/?>").unwrap());
static TABS: Lazy<Regex> = Lazy::new(|| Regex::new(r"<w:tab\s*/?>").unwrap());
static XML_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// DOCX handler: the file is a ZIP container, the document body lives in
/// `word/document.xml`.
pub struct DocxFile {
    path: std::path::PathBuf,
    extension: Option<String>,
}

impl DocxFile {
    pub fn new(path: std::path::PathBuf, extension: Option<String>) -> Self {
        Self { path, extension }
    }
}

/// Flatten WordprocessingML to plain text: paragraph ends and line breaks
/// become newlines, tabs become tabs, every other tag is dropped.
fn document_xml_to_text(xml: &str) -> String {
    let text = PARAGRAPH_BREAKS.replace_all(xml, "\n");
    let text = TABS.replace_all(&text, "\t");
    let text = XML_TAGS.replace_all(&text, "");
    decode_entities(&text)
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[async_trait]
impl TextSource for DocxFile {
    async fn read_text_impl(&self) -> Result<String, ExtractError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || -> Result<String, ExtractError> {
            use std::fs::File;
            use zip::ZipArchive;

            let file = File::open(&path)?;
            let mut archive = ZipArchive::new(file)?;

            let mut entry = archive.by_name("word/document.xml")?;
            let mut raw = Vec::new();
            entry.read_to_end(&mut raw)?;
            let xml = String::from_utf8_lossy(&raw);

            Ok(document_xml_to_text(&xml).trim().to_string())
        })
        .await
        .map_err(|e| ExtractError::Other(anyhow::anyhow!("DOCX task failed: {e}")))?
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    fn kind(&self) -> &'static str {
        "docx"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn create_test_docx(document_xml: &str) -> (tempfile::TempPath, std::path::PathBuf) {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();

        let file = std::fs::File::create(&path).unwrap();
        let mut zip = ZipWriter::new(file);
        zip.start_file("word/document.xml", FileOptions::default())
            .unwrap();
        zip.write_all(document_xml.as_bytes()).unwrap();
        zip.finish().unwrap();

        (temp_file.into_temp_path(), path)
    }

    #[tokio::test]
    async fn test_docx_extraction() {
        let xml = r#"<w:document><w:body><w:p><w:r><w:t>Hello</w:t></w:r></w:p><w:p><w:r><w:t>World &amp; Rust</w:t></w:r></w:p></w:body></w:document>"#;
        let (_temp_path, path) = create_test_docx(xml);

        let source = DocxFile::new(path, Some("docx".to_string()));
        let text = source.read_text().await.unwrap();
        assert_eq!(text, "Hello\nWorld & Rust");
    }

    #[tokio::test]
    async fn test_docx_tabs_and_breaks() {
        let xml = r#"<w:p><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t></w:r></w:p>"#;
        let (_temp_path, path) = create_test_docx(xml);

        let source = DocxFile::new(path, Some("docx".to_string()));
        let text = source.read_text().await.unwrap();
        assert_eq!(text, "a\tb\nc");
    }

    #[tokio::test]
    async fn test_not_a_zip_is_benign() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();
        std::fs::write(&path, "not a zip archive").unwrap();

        let source = DocxFile::new(path, Some("docx".to_string()));
        let err = source.read_text().await.unwrap_err();
        assert!(matches!(err, ExtractError::Archive(_)));
        assert!(err.is_benign());
    }

    #[test]
    fn test_decode_entities_order() {
        // &amp;lt; must decode to the literal "&lt;", not "<"
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    }
}
