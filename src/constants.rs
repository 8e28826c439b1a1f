/// Constants used throughout docsift.
/// This module centralizes the extension tables and extraction defaults.

/// Default extension filter applied when walking input directories.
pub const DEFAULT_FILETYPES: &[&str] = &["pdf", "docx", "doc"];

/// Languages accepted by the default gibberish gate (ISO 639-3 codes).
pub const DEFAULT_LANGUAGES: &[&str] = &["eng", "fra", "nld"];

/// Minimum detection confidence for the language gate.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.9;

/// Default rasterization resolution for OCR on PDF pages.
pub const DEFAULT_OCR_DPI: u32 = 300;

/// Extensions read as plain text.
pub const TEXT_EXTENSIONS: &[&str] = &["txt", "text", "md", "markdown"];

/// Raster image extensions routed straight to OCR.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff", "bmp", "gif", "ppm"];

/// Replacement table for double-encoded accent sequences that survive
/// the usual UTF-8 repair paths. Collected from real extraction corpora;
/// targets are base letters since the originals are beyond recovery.
pub const MOJIBAKE_REPLACEMENTS: &[(&str, &str)] = &[
    ("ĂŠ", "e"),
    ("ĂŞ", "e"),
    ("Ă¨", "e"),
    ("Ă´", "o"),
    ("Ăť", "u"),
    ("Ă ", "a"),
    ("Â°", "°"),
    ("ÂŤ", "«"),
    ("Âť", "»"),
    ("â€™", "'"),
    ("â€¢", "*"),
    ("’", "'"),
];
