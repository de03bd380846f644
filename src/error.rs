//! Error handling for the interview assistant application

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InterviewAssistantError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Word document extraction error: {0}")]
    DocxExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("LLM service error: {0}")]
    LlmService(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Export error: {0}")]
    Export(String),
}

pub type Result<T> = std::result::Result<T, InterviewAssistantError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for InterviewAssistantError {
    fn from(err: anyhow::Error) -> Self {
        InterviewAssistantError::LlmService(err.to_string())
    }
}

/// Convert reqwest transport errors to our custom error type
impl From<reqwest::Error> for InterviewAssistantError {
    fn from(err: reqwest::Error) -> Self {
        InterviewAssistantError::Network(err.to_string())
    }
}
