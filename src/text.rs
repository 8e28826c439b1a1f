use deunicode::deunicode;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::MOJIBAKE_REPLACEMENTS;

static SPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\x0b\x0c]+").unwrap());
static LINE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\n\r]+").unwrap());
static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:[ \t]*\n[ \t]*)+").unwrap());

/// Fix double-encoded accent sequences that no generic decoder repairs.
pub fn repair_mojibake(text: &str) -> String {
    let mut out = text.to_string();
    for (pattern, replacement) in MOJIBAKE_REPLACEMENTS {
        if out.contains(pattern) {
            out = out.replace(pattern, replacement);
        }
    }
    out
}

/// Clean raw extractor output: repair mojibake, optionally transliterate to
/// ASCII, then case-fold and trim. The output feeds text-mining pipelines,
/// which expect lowercased corpora.
pub fn clean(raw: &str, ascii: bool) -> String {
    let repaired = repair_mojibake(raw);
    let text = if ascii {
        deunicode(&repaired)
    } else {
        repaired
    };
    text.to_lowercase().trim().to_string()
}

/// Collapse runs of spaces/tabs to a single space and runs of blank lines to
/// a single line break.
pub fn normalize_whitespace(text: &str) -> String {
    let text = SPACE_RUNS.replace_all(text, " ");
    let text = LINE_RUNS.replace_all(&text, "\n");
    let text = BLANK_LINES.replace_all(&text, "\n");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repair_mojibake() {
        assert_eq!(repair_mojibake("rĂŠsumĂŠ"), "resume");
        assert_eq!(repair_mojibake("it’s"), "it's");
        assert_eq!(repair_mojibake("plain text"), "plain text");
    }

    #[test]
    fn test_clean_lowercases_and_trims() {
        assert_eq!(clean("  Hello World  ", false), "hello world");
    }

    #[test]
    fn test_clean_ascii_transliterates() {
        assert_eq!(clean("Café Déjà", true), "cafe deja");
    }

    #[test]
    fn test_clean_keeps_accents_by_default() {
        assert_eq!(clean("Café", false), "café");
    }

    #[test]
    fn test_normalize_whitespace_spaces() {
        assert_eq!(normalize_whitespace("a   b\t\tc"), "a b c");
    }

    #[test]
    fn test_normalize_whitespace_blank_lines() {
        assert_eq!(normalize_whitespace("a\n\n\nb"), "a\nb");
        assert_eq!(normalize_whitespace("a\n   \n\t\nb"), "a\nb");
    }

    #[test]
    fn test_normalize_whitespace_crlf() {
        assert_eq!(normalize_whitespace("a\r\n\r\nb"), "a\nb");
    }

    #[test]
    fn test_normalize_whitespace_trims() {
        assert_eq!(normalize_whitespace("\n  a  \n"), "a");
    }
}
