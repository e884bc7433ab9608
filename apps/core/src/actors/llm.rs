use crate::actors::traits::{ReplyGenerator, SummaryGenerator};
use crate::config::GeneratorConfig;
use crate::error::AppError;
use crate::memory::{ChatMessage, ChatRole, ReplyRequest};
use crate::prompts::SUMMARY_INSTRUCTIONS;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, instrument};

const COMPLETION_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

/// A client for an OpenAI-compatible `chat/completions` endpoint.
///
/// Serves both as the reply generator and the summary generator. Reply requests
/// are sent as a system message followed by the role-tagged history; summary
/// prompts are sent as a single user message under the clinical instructions.
#[derive(Clone)]
pub struct OpenAiCompatClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl OpenAiCompatClient {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, payload: &serde_json::Value) -> Result<reqwest::RequestBuilder, AppError> {
        let mut headers = HeaderMap::new();
        let auth_value = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|e| AppError::Config(format!("Invalid API key header: {}", e)))?;
        headers.insert(AUTHORIZATION, auth_value);

        Ok(self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .headers(headers)
            .json(payload))
    }

    async fn complete(&self, instructions: &str, messages: &[ChatMessage]) -> Result<String, AppError> {
        let mut all = Vec::with_capacity(messages.len() + 1);
        all.push(ChatMessage::new(ChatRole::System, instructions));
        all.extend_from_slice(messages);

        let payload = serde_json::json!({
            "model": self.model,
            "messages": all,
            "temperature": self.temperature,
            "stream": false,
        });

        debug!("Sending completion request with {} messages", all.len());
        let res = timeout(COMPLETION_TIMEOUT, self.build_request(&payload)?.send()).await??;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::Generator(format!(
                "Completion request failed with status {}: {}",
                status, body
            )));
        }

        let body: CompletionResponse = res.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(AppError::Generator(
                "Completion response contained no text".to_string(),
            ));
        }
        Ok(content)
    }
}

#[async_trait]
impl ReplyGenerator for OpenAiCompatClient {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn generate_reply(&self, request: ReplyRequest) -> Result<String, AppError> {
        let reply = self.complete(&request.instructions, &request.messages).await?;
        info!("Reply generated ({} chars)", reply.len());
        Ok(reply)
    }
}

#[async_trait]
impl SummaryGenerator for OpenAiCompatClient {
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn generate_summary(&self, prompt: String) -> Result<String, AppError> {
        let messages = [ChatMessage::new(ChatRole::User, prompt)];
        self.complete(SUMMARY_INSTRUCTIONS, &messages).await
    }
}
