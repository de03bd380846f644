//! CSV and plain-text exports of generated questions

use crate::config::OutputFormat;
use crate::error::{InterviewAssistantError, Result};
use crate::model::{Question, ResultBatch};
use crate::output::formatter::OutputFormatter;

/// CSV exporter for spreadsheet workflows
pub struct CsvExporter;

/// Plain-text exporter matching the downloadable question sheet
pub struct TextExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for CsvExporter {
    fn format_batch(&self, batch: &ResultBatch) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        writer
            .write_record(["category", "difficulty", "question"])
            .map_err(|e| InterviewAssistantError::Export(e.to_string()))?;

        for question in &batch.questions {
            writer
                .write_record([
                    question.category.as_str(),
                    question.difficulty.as_str(),
                    question.question.as_str(),
                ])
                .map_err(|e| InterviewAssistantError::Export(e.to_string()))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| InterviewAssistantError::Export(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| InterviewAssistantError::Export(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Csv
    }
}

impl TextExporter {
    pub fn new() -> Self {
        Self
    }

    fn group_by_category(questions: &[Question]) -> Vec<(&str, Vec<&Question>)> {
        let mut groups: Vec<(&str, Vec<&Question>)> = Vec::new();
        for question in questions {
            match groups
                .iter_mut()
                .find(|(category, _)| *category == question.category)
            {
                Some((_, members)) => members.push(question),
                None => groups.push((&question.category, vec![question])),
            }
        }
        groups
    }
}

impl Default for TextExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TextExporter {
    fn format_batch(&self, batch: &ResultBatch) -> Result<String> {
        let mut output = String::new();

        output.push_str("INTERVIEW QUESTIONS\n");
        output.push_str(&"=".repeat(50));
        output.push_str("\n\n");

        for (category, questions) in Self::group_by_category(&batch.questions) {
            let heading = category.to_uppercase();
            output.push_str(&heading);
            output.push('\n');
            output.push_str(&"-".repeat(heading.len()));
            output.push_str("\n\n");

            for (i, question) in questions.iter().enumerate() {
                output.push_str(&format!("{}. {}\n", i + 1, question.question));
                output.push_str(&format!("   Difficulty: {}\n\n", question.difficulty));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Text
    }
}
