//! Output formatters with rich console presentation

use crate::config::OutputFormat;
use crate::error::Result;
use crate::model::{Difficulty, Insights, Question, ResultBatch};
use crate::output::export::{CsvExporter, TextExporter};
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering a generation result batch
pub trait OutputFormatter {
    fn format_batch(&self, batch: &ResultBatch) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and grouped sections
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter for piping into other tools
pub struct JsonFormatter {
    pretty: bool,
}

/// Coordinates the individual formatters behind a single entry point
pub struct OutputRenderer {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    csv_exporter: CsvExporter,
    text_exporter: TextExporter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!(
                "\n{} {}\n",
                prefix.color(color).bold(),
                title.color(color).bold()
            )
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_difficulty_badge(&self, difficulty: Difficulty) -> String {
        let color = match difficulty {
            Difficulty::Easy => Color::Green,
            Difficulty::Medium => Color::Yellow,
            Difficulty::Hard => Color::Red,
        };

        if self.use_colors {
            format!("[{}]", difficulty.as_str().color(color).bold())
        } else {
            format!("[{}]", difficulty.as_str())
        }
    }

    /// Questions grouped by category in first-appearance order.
    fn group_by_category<'a>(questions: &'a [Question]) -> Vec<(&'a str, Vec<&'a Question>)> {
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

    fn format_insights(&self, insights: &Insights, output: &mut String) {
        output.push_str(&self.format_header("🔍 Resume Insights", 2));

        let technologies = if insights.technologies.is_empty() {
            "not available".to_string()
        } else {
            insights.technologies.join(", ")
        };
        output.push_str(&format!(
            "{} {}\n",
            self.colorize("Technologies:", Color::Cyan),
            technologies
        ));

        let experience = insights
            .total_years_experience
            .as_ref()
            .map(|years| years.to_string())
            .unwrap_or_else(|| "not available".to_string());
        output.push_str(&format!(
            "{} {}\n",
            self.colorize("Years of experience:", Color::Cyan),
            experience
        ));

        if insights.companies.is_empty() {
            output.push_str(&format!(
                "{} not available\n",
                self.colorize("Companies:", Color::Cyan)
            ));
        } else {
            output.push_str(&format!("{}\n", self.colorize("Companies:", Color::Cyan)));
            for company in &insights.companies {
                if company.duration.is_empty() {
                    output.push_str(&format!("  • {}\n", company.name));
                } else {
                    output.push_str(&format!("  • {} ({})\n", company.name, company.duration));
                }
            }
        }

        if insights.education.is_empty() {
            output.push_str(&format!(
                "{} not available\n",
                self.colorize("Education:", Color::Cyan)
            ));
        } else {
            output.push_str(&format!("{}\n", self.colorize("Education:", Color::Cyan)));
            for entry in &insights.education {
                let mut line = entry.degree.clone();
                if !entry.institution.is_empty() {
                    line.push_str(&format!(", {}", entry.institution));
                }
                if !entry.year.is_empty() {
                    line.push_str(&format!(" ({})", entry.year));
                }
                output.push_str(&format!("  • {}\n", line));
            }
        }

        if !insights.certifications.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                self.colorize("Certifications:", Color::Cyan),
                insights.certifications.join(", ")
            ));
        }

        if !insights.major_projects.is_empty() {
            output.push_str(&format!(
                "{}\n",
                self.colorize("Major projects:", Color::Cyan)
            ));
            for project in &insights.major_projects {
                output.push_str(&format!("  • {}\n", project));
            }
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_batch(&self, batch: &ResultBatch) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📋 INTERVIEW QUESTIONS", 1));

        let groups = Self::group_by_category(&batch.questions);
        let hard_count = batch
            .questions
            .iter()
            .filter(|q| q.difficulty == Difficulty::Hard)
            .count();
        output.push_str(&format!(
            "Total: {} questions | {} categories | {} hard\n",
            batch.questions.len(),
            groups.len(),
            hard_count
        ));

        let mut number = 0;
        for (category, questions) in groups {
            output.push_str(&self.format_header(category, 2));
            for question in questions {
                number += 1;
                output.push_str(&format!(
                    "{}. {} {}\n",
                    number,
                    self.format_difficulty_badge(question.difficulty),
                    question.question
                ));
                if let Some(instructions) = &question.instructions {
                    output.push_str(&format!(
                        "   {} {}\n",
                        self.colorize("Instructions:", Color::BrightBlack),
                        instructions
                    ));
                }
                if let Some(test_cases) = &question.test_cases {
                    output.push_str(&format!(
                        "   {}\n",
                        self.colorize("Test cases:", Color::BrightBlack)
                    ));
                    for case in test_cases {
                        output.push_str(&format!("     • {}\n", case));
                    }
                }
                output.push('\n');
            }
        }

        if !batch.insights.is_empty() {
            self.format_insights(&batch.insights, &mut output);
        }

        if !batch.ats_suggestions.is_empty() {
            output.push_str(&self.format_header("✅ ATS Optimization Suggestions", 2));
            for suggestion in &batch.ats_suggestions {
                output.push_str(&format!(
                    "  • {}\n",
                    self.colorize(suggestion, Color::Green)
                ));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_batch(&self, batch: &ResultBatch) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(batch)?)
        } else {
            Ok(serde_json::to_string(batch)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl OutputRenderer {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true),
            json_formatter: JsonFormatter::new(true),
            csv_exporter: CsvExporter::new(),
            text_exporter: TextExporter::new(),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            ..Self::new()
        }
    }

    pub fn render(&self, batch: &ResultBatch, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_batch(batch),
            OutputFormat::Json => self.json_formatter.format_batch(batch),
            OutputFormat::Csv => self.csv_exporter.format_batch(batch),
            OutputFormat::Text => self.text_exporter.format_batch(batch),
        }
    }
}

impl Default for OutputRenderer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}
