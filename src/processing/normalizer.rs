//! Cleaning of raw extracted resume text before it is sent downstream

use regex::Regex;

/// Normalizes raw document text: collapses whitespace and canonicalizes
/// bullet list markers. Pure and infallible; empty input yields an empty
/// string. The operation is idempotent.
pub struct TextNormalizer {
    newline_runs: Regex,
    bullet_markers: Regex,
    hyphen_markers: Regex,
    space_runs: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        let newline_runs = Regex::new(r"[\r\n]+").expect("Invalid newline regex");
        let bullet_markers = Regex::new(r"\s*•\s*").expect("Invalid bullet regex");
        // Only space-delimited hyphens are list markers; hyphenated words stay intact.
        let hyphen_markers = Regex::new(r"\s+-\s+").expect("Invalid hyphen regex");
        let space_runs = Regex::new(r" {2,}").expect("Invalid space regex");

        Self {
            newline_runs,
            bullet_markers,
            hyphen_markers,
            space_runs,
        }
    }

    /// Clean raw extracted text for prompt embedding.
    pub fn normalize(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }

        let mut text = self.newline_runs.replace_all(raw, " ").to_string();
        // Both bullet glyphs seen in PDF extractions map to the canonical one.
        text = text.replace('●', "•");
        text = self.bullet_markers.replace_all(&text, " • ").to_string();
        text = self.hyphen_markers.replace_all(&text, " - ").to_string();
        text = self.space_runs.replace_all(&text, " ").to_string();
        text.trim().to_string()
    }
}
