//! Interview assistant: AI-powered interview question generator from resumes

mod cli;
mod config;
mod error;
mod generator;
mod input;
mod llm;
mod model;
mod output;
mod processing;
mod session;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction};
use config::Config;
use error::{InterviewAssistantError, Result};
use generator::QuestionGenerator;
use input::manager::InputManager;
use log::{error, info};
use model::GenerationRequest;
use output::formatter::{save_to_file, OutputRenderer};
use processing::stats::ResumeAnalyzer;
use session::SessionStore;
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Generate {
            resume,
            count,
            difficulty,
            categories,
            output,
            save,
        } => {
            info!("Starting question generation");

            cli::validate_file_extension(&resume, &["pdf", "docx", "txt"])
                .map_err(|e| InterviewAssistantError::InvalidInput(format!("Resume file: {}", e)))?;

            let output_format =
                cli::parse_output_format(&output).map_err(InterviewAssistantError::InvalidInput)?;

            let difficulty_filter =
                cli::parse_difficulty_filter(&difficulty).map_err(InterviewAssistantError::InvalidInput)?;

            println!("🚀 Interview question generation");
            println!("📄 Resume: {}", resume.display());
            println!("🔧 Output Format: {:?}", output_format);

            println!("\n📂 Extracting resume text...");
            let mut input_manager = InputManager::new();
            let resume_text = input_manager.extract_text(&resume).await?;
            println!("Resume text length: {} characters", resume_text.len());

            let analyzer = ResumeAnalyzer::new();
            let stats = analyzer.text_stats(&resume_text);
            let score = analyzer.calculate_score(&resume_text);
            println!(
                "📊 {} words, {} lines | resume score: {:.0}/100",
                stats.words, stats.lines, score.overall
            );

            let request = GenerationRequest {
                resume_text,
                question_count: count,
                difficulty_filter,
                category_filter: categories,
            };

            println!("\n🤖 Generating questions with {}...", config.api.model);
            let generator = QuestionGenerator::new(&config)?;
            let outcome = generator.generate(&request).await?;

            for warning in &outcome.warnings {
                println!("⚠️  {}", warning);
            }

            let mut session = SessionStore::new();
            session.put(outcome.batch);
            let batch = session
                .get()
                .ok_or_else(|| InterviewAssistantError::InvalidInput("No results".to_string()))?;

            let use_colors = config.output.color_output && save.is_none();
            let renderer = OutputRenderer::with_colors(use_colors);
            let rendered = renderer.render(batch, &output_format)?;

            match save {
                Some(path) => {
                    save_to_file(&rendered, &path)?;
                    println!("✅ Saved {} questions to {}", batch.questions.len(), path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Analyze { resume } => {
            info!("Starting local resume analysis");

            cli::validate_file_extension(&resume, &["pdf", "docx", "txt"])
                .map_err(|e| InterviewAssistantError::InvalidInput(format!("Resume file: {}", e)))?;

            let mut input_manager = InputManager::new();
            let resume_text = input_manager.extract_text(&resume).await?;

            let analyzer = ResumeAnalyzer::new();
            let stats = analyzer.text_stats(&resume_text);
            let skills = analyzer.extract_skills(&resume_text);
            let level = analyzer.estimate_experience_level(&resume_text);
            let score = analyzer.calculate_score(&resume_text);

            println!("📄 Resume Analysis: {}\n", resume.display());
            println!(
                "Size: {} characters, {} words, {} lines",
                stats.characters, stats.words, stats.lines
            );
            println!("Experience level: {}", level.as_str());

            if skills.is_empty() {
                println!("Detected skills: none");
            } else {
                println!("Detected skills ({}):", skills.len());
                for skill in &skills {
                    println!("  • {}", skill);
                }
            }

            println!("\nScore Breakdown:");
            println!("  Skills diversity: {:.0}/100", score.skills_diversity);
            println!("  Experience level: {:.0}/100", score.experience_level);
            println!("  Completeness: {:.0}/100", score.completeness);
            println!("  Overall: {:.0}/100", score.overall);
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("API Base URL: {}", config.api.base_url);
                println!("Model: {}", config.api.model);
                println!("Request Timeout: {}s", config.api.timeout_secs);
                println!("Temperature: {}", config.api.temperature);
                println!("Max Tokens: {}", config.api.max_tokens);
                println!("\nOutput:");
                println!("  Format: {:?}", config.output.format);
                println!("  Colors: {}", config.output.color_output);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                let default_config = Config::default();
                default_config.save()?;
                println!("✅ Configuration reset successfully!");
            }
        },
    }

    Ok(())
}
