//! Defensive parsing of LLM completions into structured results
//!
//! The model's output arrives in one of two shapes: either a single JSON
//! object with top-level `insights`, `questions`, and `ats_suggestions` keys,
//! or semi-structured text with category header lines ending in ":"
//! followed by numbered question lines carrying bracketed difficulty markers.
//! The shape is resolved by a structural probe, and a parse failure degrades
//! to empty results for the affected sections. Nothing in here returns an
//! error to the caller and nothing panics on malformed input.

use crate::llm::difficulty::{infer_from_content, DifficultyClassifier};
use crate::model::{
    Difficulty, GenerationWarning, Insights, Question, ResultBatch,
};
use log::{debug, warn};
use serde::Deserialize;

/// Everything salvaged from one completion, plus non-fatal warnings.
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub batch: ResultBatch,
    pub warnings: Vec<GenerationWarning>,
}

/// JSON wire format. Field-level absence is valid and defaults to empty;
/// only a failure to decode the object itself discards the response.
#[derive(Debug, Default, Deserialize)]
struct StructuredResponse {
    #[serde(default)]
    insights: Insights,
    #[serde(default)]
    questions: Vec<RawQuestion>,
    #[serde(default)]
    ats_suggestions: Vec<String>,
}

/// A candidate question record before validation.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    instructions: Option<String>,
    #[serde(default)]
    test_cases: Option<Vec<String>>,
}

pub struct ResponseParser {
    classifier: DifficultyClassifier,
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseParser {
    pub fn new() -> Self {
        Self {
            classifier: DifficultyClassifier::new(),
        }
    }

    /// Parse a raw completion into questions, insights, and ATS suggestions.
    ///
    /// `requested_count` is the (already clamped) number of questions the
    /// prompt asked for; a mismatch is recorded as a warning, never an error.
    pub fn parse(&self, raw_completion: &str, requested_count: usize) -> ParseOutcome {
        let mut outcome = ParseOutcome::default();
        let body = strip_code_fences(raw_completion.trim());

        if body.starts_with('{') {
            // JSON shape: strict structural decode, no partial recovery.
            match serde_json::from_str::<StructuredResponse>(body) {
                Ok(response) => {
                    outcome.batch.questions = self.convert_structured_questions(response.questions);
                    outcome.batch.insights = sanitize_insights(response.insights);
                    outcome.batch.ats_suggestions = response
                        .ats_suggestions
                        .into_iter()
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect();
                }
                Err(e) => {
                    warn!("Structured response decode failed: {}", e);
                    outcome.warnings.push(GenerationWarning::ResponseDecodeFailed {
                        detail: e.to_string(),
                    });
                }
            }
        } else {
            // Text shape: line scan. This shape has no channel for insights or
            // ATS suggestions, so those stay empty.
            outcome.batch.questions = self.parse_semi_structured(body);
        }

        let parsed = outcome.batch.questions.len();
        if parsed != requested_count {
            debug!(
                "Parsed {} questions, requested {}",
                parsed, requested_count
            );
            outcome.warnings.push(GenerationWarning::QuestionCountMismatch {
                requested: requested_count,
                parsed,
            });
        }

        outcome
    }

    /// Validate decoded JSON question records. Records missing a category or
    /// question text are dropped silently; a missing or unrecognized
    /// difficulty label falls back to the content heuristic, which never
    /// fails.
    fn convert_structured_questions(&self, raw: Vec<RawQuestion>) -> Vec<Question> {
        raw.into_iter()
            .filter_map(|record| {
                let category = record.category.as_deref().map(str::trim).unwrap_or("");
                let question = record.question.as_deref().map(str::trim).unwrap_or("");
                if category.is_empty() || question.is_empty() {
                    return None;
                }

                let difficulty = record
                    .difficulty
                    .as_deref()
                    .and_then(Difficulty::from_label)
                    .unwrap_or_else(|| infer_from_content(question));

                Some(Question {
                    category: to_title_case(category),
                    difficulty,
                    question: question.to_string(),
                    instructions: record
                        .instructions
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty()),
                    test_cases: record
                        .test_cases
                        .map(|cases| {
                            cases
                                .into_iter()
                                .map(|c| c.trim().to_string())
                                .filter(|c| !c.is_empty())
                                .collect::<Vec<_>>()
                        })
                        .filter(|cases| !cases.is_empty()),
                })
            })
            .collect()
    }

    /// Semi-structured text line scan.
    ///
    /// A line ending in ":" (length > 1) sets the current category and is
    /// itself discarded. A line starting with a digit and containing ". "
    /// yields a payload that is emitted only when a category has been seen
    /// and the marker classifier produces a difficulty and non-empty text.
    /// Every other line is ignored. The per-line drops are the defensive
    /// parsing contract: malformed output must never crash the pipeline or
    /// surface a garbage row.
    fn parse_semi_structured(&self, raw: &str) -> Vec<Question> {
        let mut questions = Vec::new();
        let mut current_category: Option<String> = None;

        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if line.ends_with(':') && line.len() > 1 {
                current_category = Some(to_title_case(line.trim_end_matches(':')));
                continue;
            }

            let starts_numbered = line
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_digit());
            if !starts_numbered {
                continue;
            }
            let Some((_, payload)) = line.split_once(". ") else {
                continue;
            };

            let Some(category) = current_category.as_ref() else {
                debug!("Dropping numbered line before any category header: {}", line);
                continue;
            };
            let Some((difficulty, cleaned)) = self.classifier.classify(payload) else {
                debug!("Dropping question line without difficulty marker: {}", line);
                continue;
            };
            if cleaned.is_empty() {
                continue;
            }

            questions.push(Question {
                category: category.clone(),
                difficulty,
                question: cleaned,
                instructions: None,
                test_cases: None,
            });
        }

        questions
    }
}

/// Dedupe list-valued insight fields and drop blank entries, preserving order.
fn sanitize_insights(insights: Insights) -> Insights {
    Insights {
        technologies: dedupe(insights.technologies),
        certifications: dedupe(insights.certifications),
        major_projects: insights
            .major_projects
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        ..insights
    }
}

fn dedupe(values: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        let trimmed = value.trim().to_string();
        if trimmed.is_empty() {
            continue;
        }
        if !seen.iter().any(|s| s.eq_ignore_ascii_case(&trimmed)) {
            seen.push(trimmed);
        }
    }
    seen
}

/// The prompt forbids markdown fencing, but models drift; tolerate a fenced
/// completion rather than failing the decode on it.
fn strip_code_fences(text: &str) -> &str {
    let Some(without_open) = text.strip_prefix("```") else {
        return text;
    };
    // The fence may carry a language tag, e.g. ```json
    let without_tag = match without_open.split_once('\n') {
        Some((_, rest)) => rest,
        None => without_open,
    };
    without_tag
        .strip_suffix("```")
        .map(str::trim)
        .unwrap_or(without_tag)
        .trim()
}

/// Canonical display form for category labels.
fn to_title_case(text: &str) -> String {
    text.trim()
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semi_structured_two_question_scenario() {
        let parser = ResponseParser::new();
        let completion = "TECHNICAL SKILLS:\n1. [EASY] What is a list?\n2. [HARD] Design a cache";

        let outcome = parser.parse(completion, 2);
        let questions = &outcome.batch.questions;

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].category, "Technical Skills");
        assert_eq!(questions[0].difficulty, Difficulty::Easy);
        assert_eq!(questions[0].question, "What is a list?");
        assert_eq!(questions[1].category, "Technical Skills");
        assert_eq!(questions[1].difficulty, Difficulty::Hard);
        assert_eq!(questions[1].question, "Design a cache");
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_format_example_round_trips_through_line_scan() {
        // The schema example the prompt builder embeds must itself parse:
        // the builder and the parser share one contract.
        let example = crate::llm::prompts::PromptBuilder::new().format_example(
            &[Difficulty::Easy, Difficulty::Hard],
            &["Technical Skills".to_string(), "Problem Solving".to_string()],
        );

        let outcome = ResponseParser::new().parse(&example, 4);
        let questions = &outcome.batch.questions;

        assert_eq!(questions.len(), 4);
        assert_eq!(questions[0].category, "Technical Skills");
        assert_eq!(questions[2].category, "Problem Solving");
        assert_eq!(questions[0].difficulty, Difficulty::Easy);
        assert_eq!(questions[1].difficulty, Difficulty::Hard);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_semi_structured_numbered_line_before_header_dropped() {
        let parser = ResponseParser::new();
        let completion = "1. [EASY] Orphan question\nBEHAVIORAL:\n1. [MEDIUM] Real question";

        let outcome = parser.parse(completion, 1);
        let questions = &outcome.batch.questions;

        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "Real question");
        assert_eq!(questions[0].category, "Behavioral");
    }

    #[test]
    fn test_semi_structured_line_without_marker_dropped() {
        let parser = ResponseParser::new();
        let completion = "TECHNICAL SKILLS:\n1. Question without a marker\n2. [EASY] Tagged";

        let outcome = parser.parse(completion, 2);
        assert_eq!(outcome.batch.questions.len(), 1);
        assert_eq!(outcome.batch.questions[0].question, "Tagged");
        // Under-count is a warning, not an error.
        assert!(outcome
            .warnings
            .iter()
            .any(|w| matches!(w, GenerationWarning::QuestionCountMismatch { parsed: 1, requested: 2 })));
    }

    #[test]
    fn test_semi_structured_ignores_prose_and_blank_lines() {
        let parser = ResponseParser::new();
        let completion =
            "Here are your questions.\n\nTECHNICAL SKILLS:\n\nSome commentary\n1. [EASY] What is Rust?\n";

        let outcome = parser.parse(completion, 1);
        assert_eq!(outcome.batch.questions.len(), 1);
        assert!(outcome.batch.insights.is_empty());
        assert!(outcome.batch.ats_suggestions.is_empty());
    }

    #[test]
    fn test_semi_structured_header_is_never_a_question() {
        let parser = ResponseParser::new();
        let completion = "PROBLEM SOLVING:\nEXPERIENCE:\n1. [HARD] Debug a memory leak";

        let outcome = parser.parse(completion, 1);
        assert_eq!(outcome.batch.questions.len(), 1);
        // The latest header wins.
        assert_eq!(outcome.batch.questions[0].category, "Experience");
    }

    #[test]
    fn test_json_full_decode() {
        let parser = ResponseParser::new();
        let completion = r#"{
            "insights": {
                "technologies": ["Python", "python", "AWS", ""],
                "companies": [{"name": "TechCorp", "duration": "2021 - Present"}],
                "total_years_experience": "8+ years",
                "education": [{"degree": "BSc", "institution": "University of Technology", "year": "2019"}],
                "certifications": ["AWS SAA"],
                "major_projects": ["E-commerce platform"]
            },
            "questions": [
                {"category": "Technical Skills", "difficulty": "Easy", "question": "What is Python?"},
                {"category": "technical skills", "difficulty": "Hard", "question": "Design a cache"}
            ],
            "ats_suggestions": ["Add keywords", "Use standard headings", "Quantify impact"]
        }"#;

        let outcome = parser.parse(completion, 2);
        let batch = &outcome.batch;

        assert_eq!(batch.questions.len(), 2);
        assert_eq!(batch.questions[0].difficulty, Difficulty::Easy);
        assert_eq!(batch.questions[1].category, "Technical Skills");
        // Technologies deduplicated case-insensitively, blanks dropped.
        assert_eq!(batch.insights.technologies, vec!["Python", "AWS"]);
        assert_eq!(batch.insights.companies.len(), 1);
        assert_eq!(batch.ats_suggestions.len(), 3);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_malformed_json_degrades_to_empty() {
        let parser = ResponseParser::new();
        let outcome = parser.parse("{\"questions\": [unclosed", 5);

        assert!(outcome.batch.questions.is_empty());
        assert!(outcome.batch.insights.is_empty());
        assert!(outcome.batch.ats_suggestions.is_empty());
        assert!(outcome
            .warnings
            .iter()
            .any(|w| matches!(w, GenerationWarning::ResponseDecodeFailed { .. })));
    }

    #[test]
    fn test_json_incomplete_records_dropped() {
        let parser = ResponseParser::new();
        let completion = r#"{
            "questions": [
                {"category": "Technical Skills", "difficulty": "Easy", "question": "Kept"},
                {"difficulty": "Easy", "question": "No category"},
                {"category": "Technical Skills", "difficulty": "Easy"},
                {"category": "", "difficulty": "Easy", "question": "Blank category"}
            ]
        }"#;

        let outcome = parser.parse(completion, 1);
        assert_eq!(outcome.batch.questions.len(), 1);
        assert_eq!(outcome.batch.questions[0].question, "Kept");
    }

    #[test]
    fn test_json_unknown_difficulty_falls_back_to_heuristic() {
        let parser = ResponseParser::new();
        let completion = r#"{
            "questions": [
                {"category": "Technical Skills", "difficulty": "Expert", "question": "Design a sharded database"},
                {"category": "Behavioral", "question": "What is your management style?"}
            ]
        }"#;

        let outcome = parser.parse(completion, 2);
        assert_eq!(outcome.batch.questions[0].difficulty, Difficulty::Hard);
        assert_eq!(outcome.batch.questions[1].difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_json_coding_question_fields_pass_through() {
        let parser = ResponseParser::new();
        let completion = r#"{
            "questions": [{
                "category": "Coding Test",
                "difficulty": "Medium",
                "question": "Reverse a linked list",
                "instructions": "Input: head node. Output: new head.",
                "test_cases": ["1->2->3 => 3->2->1", "[] => []"]
            }]
        }"#;

        let outcome = parser.parse(completion, 1);
        let question = &outcome.batch.questions[0];
        assert!(question.instructions.is_some());
        assert_eq!(question.test_cases.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_fenced_json_still_decodes() {
        let parser = ResponseParser::new();
        let completion = "```json\n{\"questions\": [{\"category\": \"Behavioral\", \"difficulty\": \"Medium\", \"question\": \"Why us?\"}]}\n```";

        let outcome = parser.parse(completion, 1);
        assert_eq!(outcome.batch.questions.len(), 1);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_empty_completion() {
        let parser = ResponseParser::new();
        let outcome = parser.parse("", 5);
        assert!(outcome.batch.questions.is_empty());
        assert!(outcome
            .warnings
            .iter()
            .any(|w| matches!(w, GenerationWarning::QuestionCountMismatch { .. })));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(to_title_case("TECHNICAL SKILLS"), "Technical Skills");
        assert_eq!(to_title_case("experience & projects"), "Experience & Projects");
        assert_eq!(to_title_case("  coding   test "), "Coding Test");
    }
}
