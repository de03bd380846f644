//! Interview assistant library

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod input;
pub mod llm;
pub mod model;
pub mod output;
pub mod processing;
pub mod session;

pub use config::Config;
pub use error::{InterviewAssistantError, Result};
