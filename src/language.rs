use tracing::warn;
use whatlang::Lang;

use crate::error::ExtractError;

/// Gibberish gate: rejects extracted text whose dominant language is not in
/// the allowed set with sufficient confidence. Catches the typical failure
/// mode of text-layer extraction from scanned or damaged PDFs, where the
/// decoder returns byte salad instead of raising an error.
#[derive(Debug, Clone)]
pub struct LanguageGate {
    allowed: Vec<Lang>,
    min_confidence: f64,
}

impl LanguageGate {
    /// Build a gate from ISO 639-3 codes. Unknown codes are warned about and
    /// ignored; an empty list disables the gate.
    pub fn from_codes(codes: &[String], min_confidence: f64) -> Self {
        let mut allowed = Vec::new();
        for code in codes {
            if code.trim().is_empty() {
                continue;
            }
            match Lang::from_code(code.trim()) {
                Some(lang) => allowed.push(lang),
                None => warn!("unknown language code in filter: {}", code),
            }
        }
        Self {
            allowed,
            min_confidence,
        }
    }

    /// A gate that accepts everything.
    pub fn disabled() -> Self {
        Self {
            allowed: Vec::new(),
            min_confidence: 0.0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.allowed.is_empty()
    }

    /// Check cleaned text against the allowed set.
    pub fn check(&self, text: &str) -> Result<(), ExtractError> {
        if !self.is_enabled() {
            return Ok(());
        }
        let info = whatlang::detect(text).ok_or(ExtractError::LanguageRejected {
            lang: "unknown".to_string(),
            confidence: 0.0,
        })?;
        if !self.allowed.contains(&info.lang()) || info.confidence() < self.min_confidence {
            return Err(ExtractError::LanguageRejected {
                lang: info.lang().code().to_string(),
                confidence: info.confidence(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENGLISH: &str = "The quick brown fox jumps over the lazy dog. \
        This paragraph is long enough for the detector to classify it as \
        English with a very high degree of confidence.";

    #[test]
    fn test_disabled_gate_accepts_anything() {
        let gate = LanguageGate::disabled();
        assert!(!gate.is_enabled());
        assert!(gate.check("qsdf jklm zzzz").is_ok());
    }

    #[test]
    fn test_empty_codes_disable_gate() {
        let gate = LanguageGate::from_codes(&[], 0.9);
        assert!(!gate.is_enabled());
    }

    #[test]
    fn test_accepts_allowed_language() {
        let gate = LanguageGate::from_codes(&["eng".to_string()], 0.9);
        assert!(gate.check(ENGLISH).is_ok());
    }

    #[test]
    fn test_rejects_other_language() {
        let gate = LanguageGate::from_codes(&["rus".to_string()], 0.9);
        let err = gate.check(ENGLISH).unwrap_err();
        assert!(matches!(err, ExtractError::LanguageRejected { .. }));
    }

    #[test]
    fn test_unknown_codes_are_ignored() {
        let gate = LanguageGate::from_codes(&["eng".to_string(), "xx".to_string()], 0.9);
        assert!(gate.is_enabled());
        assert!(gate.check(ENGLISH).is_ok());
    }
}
