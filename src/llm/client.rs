//! HTTP client for the external LLM service
//!
//! Wraps an OpenAI-style chat-completions endpoint. One attempt per call, no
//! retry: a failed or timed-out call surfaces as a recoverable error and the
//! caller decides whether to try again.

use crate::config::ApiConfig;
use crate::error::{InterviewAssistantError, Result};
use log::{debug, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const MODEL_ENV: &str = "OPENAI_MODEL";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Client for the chat-completions endpoint.
pub struct LlmClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
    max_tokens: u32,
}

impl LlmClient {
    /// Build a client from configuration plus environment.
    ///
    /// The API key comes exclusively from the environment and its absence is
    /// fatal here: the generation subsystem refuses to initialize rather
    /// than failing silently per call.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let api_key = env::var(API_KEY_ENV).map_err(|_| {
            InterviewAssistantError::Configuration(format!(
                "{} environment variable not set",
                API_KEY_ENV
            ))
        })?;
        if api_key.trim().is_empty() {
            return Err(InterviewAssistantError::Configuration(format!(
                "{} environment variable is empty",
                API_KEY_ENV
            )));
        }

        let model = env::var(MODEL_ENV).unwrap_or_else(|_| config.model.clone());

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                InterviewAssistantError::Configuration(format!(
                    "Failed to create HTTP client: {}",
                    e
                ))
            })?;

        Ok(Self {
            client,
            api_key,
            model,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one completion request and return the raw completion text.
    pub async fn complete(&self, system: &str, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        info!("Sending completion request to model {}", self.model);
        debug!("Prompt length: {} characters", prompt.len());

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    InterviewAssistantError::LlmService("LLM request timed out".to_string())
                } else {
                    InterviewAssistantError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InterviewAssistantError::LlmService(format!(
                "LLM service returned {}: {}",
                status, body
            )));
        }

        let completion: ChatResponse = response.json().await.map_err(|e| {
            InterviewAssistantError::LlmService(format!("Malformed completion envelope: {}", e))
        })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(InterviewAssistantError::LlmService(
                "LLM returned an empty completion".to_string(),
            ));
        }

        debug!("Received completion of {} characters", content.len());
        Ok(content)
    }
}
