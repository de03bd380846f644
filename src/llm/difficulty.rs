//! Difficulty classification for question payloads
//!
//! Two distinct strategies exist because two historical response contracts
//! do: marker extraction for payloads the model has tagged with bracketed
//! tokens, and a content heuristic for contracts that never embedded
//! markers. The response parser selects the strategy per response shape.

use crate::model::Difficulty;
use regex::Regex;

/// Marker tokens are searched in this fixed order. Easy before Hard before
/// Medium reproduces the legacy tie-break: multiple markers should not occur,
/// but when they do the resolution must be deterministic.
const MARKER_PRIORITY: [(Difficulty, &str); 3] = [
    (Difficulty::Easy, "EASY"),
    (Difficulty::Hard, "HARD"),
    (Difficulty::Medium, "MEDIUM"),
];

/// A bare (unbracketed) keyword only counts as a marker when it starts within
/// this many bytes of the payload.
const BARE_KEYWORD_WINDOW: usize = 20;

/// Extracts explicit difficulty markers from question payloads.
pub struct DifficultyClassifier {
    bracketed: Vec<(Difficulty, Regex)>,
    bare: Vec<(Difficulty, Regex)>,
    residual_brackets: Regex,
    whitespace_runs: Regex,
}

impl Default for DifficultyClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl DifficultyClassifier {
    pub fn new() -> Self {
        let bracketed = MARKER_PRIORITY
            .iter()
            .map(|(difficulty, token)| {
                let pattern = format!(r"(?i)\[{}\]", token);
                (*difficulty, Regex::new(&pattern).expect("Invalid marker regex"))
            })
            .collect();

        let bare = MARKER_PRIORITY
            .iter()
            .map(|(difficulty, token)| {
                let pattern = format!(r"(?i){}", token);
                (*difficulty, Regex::new(&pattern).expect("Invalid keyword regex"))
            })
            .collect();

        let residual_brackets = Regex::new(r"[\[\]]").expect("Invalid bracket regex");
        let whitespace_runs = Regex::new(r"\s+").expect("Invalid whitespace regex");

        Self {
            bracketed,
            bare,
            residual_brackets,
            whitespace_runs,
        }
    }

    /// Classify a question payload by explicit marker.
    ///
    /// Returns the difficulty and the payload with the marker stripped and
    /// cleaned, or `None` when no marker is found by either strategy. The
    /// cleaned text may still be empty; callers drop those payloads.
    pub fn classify(&self, payload: &str) -> Option<(Difficulty, String)> {
        // Primary: bracketed tokens anywhere in the payload.
        for (difficulty, marker) in &self.bracketed {
            if marker.is_match(payload) {
                let stripped = marker.replace_all(payload, "");
                return Some((*difficulty, self.tidy(&stripped)));
            }
        }

        // Fallback: bare keyword near the start of the payload.
        for (difficulty, keyword) in &self.bare {
            if let Some(found) = keyword.find(payload) {
                if found.start() < BARE_KEYWORD_WINDOW {
                    let stripped = keyword.replace_all(payload, "");
                    return Some((*difficulty, self.tidy(&stripped)));
                }
            }
        }

        None
    }

    /// Unconditional cleanup once a label is determined: residual brackets
    /// removed, whitespace runs collapsed, trimmed.
    fn tidy(&self, text: &str) -> String {
        let no_brackets = self.residual_brackets.replace_all(text, "");
        self.whitespace_runs
            .replace_all(&no_brackets, " ")
            .trim()
            .to_string()
    }
}

/// Category-blind difficulty inference from question content alone, used when
/// the response contract provides no markers at all.
pub fn infer_from_content(question: &str) -> Difficulty {
    const EASY_TERMS: [&str; 6] = [
        "what is",
        "define",
        "explain",
        "describe",
        "basic",
        "fundamental",
    ];
    const HARD_TERMS: [&str; 7] = [
        "design",
        "architecture",
        "optimize",
        "scale",
        "complex",
        "advanced",
        "implement",
    ];

    let lower = question.to_lowercase();

    if EASY_TERMS.iter().any(|term| lower.contains(term)) {
        Difficulty::Easy
    } else if HARD_TERMS.iter().any(|term| lower.contains(term)) {
        Difficulty::Hard
    } else {
        Difficulty::Medium
    }
}
