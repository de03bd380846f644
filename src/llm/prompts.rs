//! Prompt construction for question generation
//!
//! The builder is deterministic: the same request always produces the same
//! prompt string. It embeds the exact output schema the response parser
//! understands, so the two files evolve together.

use crate::model::{Difficulty, GenerationWarning};

/// Hard ceiling on the number of questions requested from the model.
pub const MAX_QUESTION_COUNT: usize = 10;

/// Character budget for the resume text embedded in the prompt. The cut is a
/// hard one, not word-boundary aware; the tail of an oversized resume is a
/// known lossy boundary.
pub const MAX_RESUME_CHARS: usize = 5000;

/// Maximum number of coding questions requested by the coding-test extension.
const MAX_CODING_QUESTIONS: usize = 2;

/// Fixed system instruction sent with every generation call.
pub const SYSTEM_PROMPT: &str = "You are an expert interviewer who creates relevant and \
insightful interview questions based on candidate resumes. You are also expert in python, \
pyspark, java, c++, c, javascript, html, css, sql databases, nosql databases, data structures, \
data modeling, algorithms, system design, microservices, distributed systems, cloud computing, \
artificial intelligence, machine learning, deep learning, natural language processing, computer \
vision, robotics, data analysis, data visualization, data engineering, data science, data \
warehousing, REST APIs, and CICD pipelines.";

/// A constructed prompt plus the effective parameters after clamping.
#[derive(Debug, Clone)]
pub struct BuiltPrompt {
    pub prompt: String,
    pub question_count: usize,
    pub warnings: Vec<GenerationWarning>,
}

pub struct PromptBuilder;

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the generation prompt for one request.
    pub fn build(
        &self,
        resume_text: &str,
        question_count: usize,
        difficulty_filter: &[Difficulty],
        category_filter: &[String],
    ) -> BuiltPrompt {
        let mut warnings = Vec::new();

        let question_count = if question_count > MAX_QUESTION_COUNT {
            warnings.push(GenerationWarning::QuestionCountClamped {
                requested: question_count,
                max: MAX_QUESTION_COUNT,
            });
            MAX_QUESTION_COUNT
        } else {
            question_count
        };

        let resume_excerpt: String = resume_text.chars().take(MAX_RESUME_CHARS).collect();

        let difficulties = difficulty_filter
            .iter()
            .map(|d| d.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let categories = category_filter.join(", ");

        let mut prompt = format!(
            r#"Given the following resume, perform ALL of the following tasks:

1. Extract and return these key insights in JSON:
   - technologies (skills, tools, programming languages, frameworks)
   - companies (with durations, e.g., company name and years/months worked)
   - total_years_experience (if possible)
   - education (degree, institution, graduation year)
   - certifications (if any)
   - major_projects (if any)
2. Generate exactly {question_count} relevant interview questions for a technical role, using:
   - Difficulty levels: {difficulties}
   - Categories: {categories}
   - Make questions specific to the candidate's background and experience
   - Use this format with category headers:
{format_example}
3. Provide 3 actionable suggestions to make this resume more ATS (Applicant Tracking System) friendly. Focus on missing keywords, formatting, clarity, and completeness.

Resume Content:
{resume_excerpt}

Return your answer in the following JSON structure:
{{
    "insights": {{
        "technologies": [...],
        "companies": [{{"name": "...", "duration": "..."}}],
        "total_years_experience": ...,
        "education": [{{"degree": "...", "institution": "...", "year": "..."}}],
        "certifications": [...],
        "major_projects": [...]
    }},
    "questions": [
        {{"category": "...", "difficulty": "...", "question": "..."}},
        ...
    ],
    "ats_suggestions": ["...", "...", "..."]
}}

CRITICAL RULES:
- Return ONLY the JSON object, no explanations or markdown.
- For questions, use the specified categories and difficulty levels.
- For insights, fill as much as possible from the resume.
- For ATS suggestions, be specific and actionable."#,
            question_count = question_count,
            difficulties = difficulties,
            categories = categories,
            format_example = self.format_example(difficulty_filter, category_filter),
            resume_excerpt = resume_excerpt,
        );

        if wants_coding_test(category_filter) {
            prompt.push_str(&format!(
                "\n\nAdditionally, generate up to {} algorithmic coding questions for the \
                 'Coding Test' category. Each coding question must include: a clear problem \
                 statement, input/output format, at least 2 sample test cases, and a difficulty \
                 from the selected levels. Put the problem statement in the question field, the \
                 input/output format in an instructions field, and the sample test cases in a \
                 test_cases array.",
                MAX_CODING_QUESTIONS
            ));
        }

        BuiltPrompt {
            prompt,
            question_count,
            warnings,
        }
    }

    /// The schema example embedded verbatim in the prompt: upper-cased
    /// category headers, numbered lines, bracketed markers drawn only from
    /// the selected difficulty levels.
    pub fn format_example(
        &self,
        difficulty_filter: &[Difficulty],
        category_filter: &[String],
    ) -> String {
        category_filter
            .iter()
            .map(|category| {
                let lines = difficulty_filter
                    .iter()
                    .enumerate()
                    .map(|(i, difficulty)| {
                        format!(
                            "{}. [{}] [Question text]",
                            i + 1,
                            difficulty.as_str().to_uppercase()
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                format!("{}:\n{}", category.to_uppercase(), lines)
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

fn wants_coding_test(category_filter: &[String]) -> bool {
    category_filter
        .iter()
        .any(|c| c.eq_ignore_ascii_case("coding test"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_prompt_embeds_resume_and_filters() {
        let builder = PromptBuilder::new();
        let built = builder.build(
            "Software Engineer with Python experience at Tech Corp.",
            5,
            &[Difficulty::Easy, Difficulty::Hard],
            &categories(&["Technical Skills"]),
        );

        assert!(built.prompt.contains("Software Engineer with Python experience"));
        assert!(built.prompt.contains("exactly 5 relevant interview questions"));
        assert!(built.prompt.contains("Difficulty levels: Easy, Hard"));
        assert!(built.prompt.contains("Categories: Technical Skills"));
        assert!(built.prompt.contains("TECHNICAL SKILLS:"));
        assert!(built.prompt.contains("\"ats_suggestions\""));
        assert!(built.warnings.is_empty());
    }

    #[test]
    fn test_question_count_clamped_with_warning() {
        let builder = PromptBuilder::new();
        let built = builder.build(
            "resume",
            15,
            &[Difficulty::Easy],
            &categories(&["Technical Skills"]),
        );

        assert_eq!(built.question_count, 10);
        assert!(built.prompt.contains("exactly 10 relevant interview questions"));
        assert_eq!(
            built.warnings,
            vec![GenerationWarning::QuestionCountClamped {
                requested: 15,
                max: 10
            }]
        );
    }

    #[test]
    fn test_resume_truncated_to_budget() {
        let builder = PromptBuilder::new();
        let long_resume = "x".repeat(MAX_RESUME_CHARS + 500);
        let built = builder.build(
            &long_resume,
            5,
            &[Difficulty::Medium],
            &categories(&["Behavioral"]),
        );

        assert!(!built.prompt.contains(&long_resume));
        assert!(built.prompt.contains(&"x".repeat(MAX_RESUME_CHARS)));
    }

    #[test]
    fn test_format_example_uses_only_selected_difficulties() {
        let builder = PromptBuilder::new();
        let example = builder.format_example(
            &[Difficulty::Easy, Difficulty::Hard],
            &categories(&["Technical Skills", "Problem Solving"]),
        );

        assert!(example.contains("TECHNICAL SKILLS:"));
        assert!(example.contains("PROBLEM SOLVING:"));
        assert!(example.contains("[EASY]"));
        assert!(example.contains("[HARD]"));
        assert!(!example.contains("[MEDIUM]"));
    }

    #[test]
    fn test_coding_test_extension_appended() {
        let builder = PromptBuilder::new();
        let with_coding = builder.build(
            "resume",
            5,
            &[Difficulty::Hard],
            &categories(&["Coding Test"]),
        );
        assert!(with_coding.prompt.contains("sample test cases"));

        let without_coding = builder.build(
            "resume",
            5,
            &[Difficulty::Hard],
            &categories(&["Behavioral"]),
        );
        assert!(!without_coding.prompt.contains("sample test cases"));
    }

    #[test]
    fn test_builder_is_deterministic() {
        let builder = PromptBuilder::new();
        let a = builder.build(
            "resume",
            5,
            &[Difficulty::Easy],
            &categories(&["Technical Skills"]),
        );
        let b = builder.build(
            "resume",
            5,
            &[Difficulty::Easy],
            &categories(&["Technical Skills"]),
        );
        assert_eq!(a.prompt, b.prompt);
    }
}
