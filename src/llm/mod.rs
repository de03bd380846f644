//! LLM integration module
//! Prompt construction, the service client, and completion parsing

pub mod client;
pub mod difficulty;
pub mod parser;
pub mod prompts;
