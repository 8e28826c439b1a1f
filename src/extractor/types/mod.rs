pub mod csv;
pub mod doc;
pub mod docx;
pub mod image;
pub mod pdf;
pub mod text;
pub mod unsupported;

pub use csv::CsvFile;
pub use doc::DocFile;
pub use docx::DocxFile;
pub use image::ImageFile;
pub use pdf::PdfFile;
pub use text::PlainTextFile;
pub use unsupported::UnsupportedFile;
