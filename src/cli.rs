//! CLI interface for the interview assistant

use crate::model::Difficulty;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "interview-assistant")]
#[command(about = "AI-powered interview question generator from resumes")]
#[command(
    long_about = "Generate personalized interview questions from a candidate's resume using an OpenAI-compatible chat model, with difficulty and category filters"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate interview questions from a resume
    Generate {
        /// Path to resume file (PDF, DOCX, TXT)
        #[arg(short, long)]
        resume: PathBuf,

        /// Number of questions to generate (max 10)
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,

        /// Difficulty levels to include: easy, medium, hard
        #[arg(short, long, value_delimiter = ',', default_values_t = ["easy".to_string(), "medium".to_string(), "hard".to_string()])]
        difficulty: Vec<String>,

        /// Question categories to cover
        #[arg(
            long,
            value_delimiter = ',',
            default_values_t = [
                "Technical Skills".to_string(),
                "Problem Solving".to_string(),
                "Experience Based".to_string(),
            ]
        )]
        categories: Vec<String>,

        /// Output format: console, json, csv, text
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Analyze a resume without calling the LLM
    Analyze {
        /// Path to resume file (PDF, DOCX, TXT)
        #[arg(short, long)]
        resume: PathBuf,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "csv" => Ok(crate::config::OutputFormat::Csv),
        "text" | "txt" => Ok(crate::config::OutputFormat::Text),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, csv, text",
            format
        )),
    }
}

/// Parse comma-separated difficulty names into the fixed enum
pub fn parse_difficulty_filter(names: &[String]) -> Result<Vec<Difficulty>, String> {
    let mut levels = Vec::new();
    for name in names {
        let level = Difficulty::from_label(name)
            .ok_or_else(|| format!("Invalid difficulty: {}. Supported: easy, medium, hard", name))?;
        if !levels.contains(&level) {
            levels.push(level);
        }
    }
    Ok(levels)
}

/// Validate file extension
pub fn validate_file_extension(path: &PathBuf, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
