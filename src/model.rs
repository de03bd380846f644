//! Core data model for generated questions, resume insights, and requests

use crate::error::{InterviewAssistantError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Difficulty level of an interview question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Parse a difficulty label case-insensitively, ignoring surrounding whitespace.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single generated interview question.
///
/// Every emitted question carries a non-empty category, a non-empty question
/// text stripped of difficulty markup, and a difficulty from the fixed enum.
/// Candidate records that cannot satisfy this are dropped during parsing,
/// never emitted with placeholders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub category: String,
    pub difficulty: Difficulty,
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_cases: Option<Vec<String>>,
}

/// A company the candidate worked at, with the stated duration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Company {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub duration: String,
}

/// An education entry extracted from the resume.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Education {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub year: String,
}

/// Total years of experience as reported by the model: either a number or
/// free text such as "8+ years".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearsExperience {
    Number(f64),
    Text(String),
}

impl fmt::Display for YearsExperience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearsExperience::Number(n) => write!(f, "{}", n),
            YearsExperience::Text(s) => f.write_str(s),
        }
    }
}

/// Key insights extracted from a resume. Every field is optional; absence is
/// valid and renders as "not available", never as an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Insights {
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub companies: Vec<Company>,
    #[serde(default)]
    pub total_years_experience: Option<YearsExperience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub major_projects: Vec<String>,
}

impl Insights {
    pub fn is_empty(&self) -> bool {
        self.technologies.is_empty()
            && self.companies.is_empty()
            && self.total_years_experience.is_none()
            && self.education.is_empty()
            && self.certifications.is_empty()
            && self.major_projects.is_empty()
    }
}

/// One atomic batch of generation results. A batch replaces the previous one
/// in the session store wholesale, it is never merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultBatch {
    pub questions: Vec<Question>,
    pub insights: Insights,
    pub ats_suggestions: Vec<String>,
}

/// Input for one generation run. Constructed fresh per user action, never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub resume_text: String,
    pub question_count: usize,
    pub difficulty_filter: Vec<Difficulty>,
    pub category_filter: Vec<String>,
}

impl GenerationRequest {
    pub fn validate(&self) -> Result<()> {
        if self.resume_text.trim().is_empty() {
            return Err(InterviewAssistantError::InvalidInput(
                "Resume text is empty".to_string(),
            ));
        }
        if self.difficulty_filter.is_empty() {
            return Err(InterviewAssistantError::InvalidInput(
                "Select at least one difficulty level".to_string(),
            ));
        }
        if self.category_filter.is_empty() {
            return Err(InterviewAssistantError::InvalidInput(
                "Select at least one category".to_string(),
            ));
        }
        if self.question_count == 0 {
            return Err(InterviewAssistantError::InvalidInput(
                "Question count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Non-fatal conditions surfaced alongside a successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationWarning {
    QuestionCountClamped { requested: usize, max: usize },
    QuestionCountMismatch { requested: usize, parsed: usize },
    ResponseDecodeFailed { detail: String },
}

impl fmt::Display for GenerationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationWarning::QuestionCountClamped { requested, max } => write!(
                f,
                "Question count {} limited to maximum of {}",
                requested, max
            ),
            GenerationWarning::QuestionCountMismatch { requested, parsed } => write!(
                f,
                "Generated {} questions instead of requested {}. This may be due to LLM response format.",
                parsed, requested
            ),
            GenerationWarning::ResponseDecodeFailed { detail } => {
                write!(f, "Failed to decode LLM response: {}", detail)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_from_label() {
        assert_eq!(Difficulty::from_label("easy"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_label(" MEDIUM "), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_label("Hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_label("expert"), None);
        assert_eq!(Difficulty::from_label(""), None);
    }

    #[test]
    fn test_years_experience_decodes_number_or_text() {
        let n: YearsExperience = serde_json::from_str("8").unwrap();
        assert!(matches!(n, YearsExperience::Number(v) if v == 8.0));

        let t: YearsExperience = serde_json::from_str("\"8+ years\"").unwrap();
        assert!(matches!(t, YearsExperience::Text(ref s) if s == "8+ years"));
    }

    #[test]
    fn test_insights_is_empty() {
        let insights = Insights::default();
        assert!(insights.is_empty());

        let with_tech = Insights {
            technologies: vec!["Rust".to_string()],
            ..Default::default()
        };
        assert!(!with_tech.is_empty());
    }

    #[test]
    fn test_request_validation() {
        let request = GenerationRequest {
            resume_text: "Senior engineer, 8 years of Python.".to_string(),
            question_count: 5,
            difficulty_filter: vec![Difficulty::Easy],
            category_filter: vec!["Technical Skills".to_string()],
        };
        assert!(request.validate().is_ok());

        let no_difficulty = GenerationRequest {
            difficulty_filter: vec![],
            ..request.clone()
        };
        assert!(no_difficulty.validate().is_err());

        let no_category = GenerationRequest {
            category_filter: vec![],
            ..request.clone()
        };
        assert!(no_category.validate().is_err());

        let empty_resume = GenerationRequest {
            resume_text: "   ".to_string(),
            ..request
        };
        assert!(empty_resume.validate().is_err());
    }
}
