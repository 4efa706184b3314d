use serde::{Deserialize, Serialize};

use super::transport::{build_http_client, ensure_success, map_send_error, PromptTransport};
use super::ProviderError;

pub const DEFAULT_DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com";
pub const DEFAULT_DEEPSEEK_MODEL: &str = "deepseek-chat";

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 4000;

/// DeepSeek client over the OpenAI-compatible chat completions API.
pub struct DeepSeekClient {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl DeepSeekClient {
    pub fn new(
        base_url: &str,
        model: &str,
        api_key: &str,
        timeout_secs: u64,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            client: build_http_client(timeout_secs)?,
            timeout_secs,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

fn chat_request<'a>(model: &'a str, system: &'a str, prompt: &'a str) -> ChatRequest<'a> {
    let mut messages = Vec::with_capacity(2);
    if !system.trim().is_empty() {
        messages.push(ChatMessage {
            role: "system",
            content: system,
        });
    }
    messages.push(ChatMessage {
        role: "user",
        content: prompt,
    });

    ChatRequest {
        model,
        messages,
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
        stream: false,
    }
}

fn first_choice_text(response: ChatResponse) -> Result<String, ProviderError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| ProviderError::MalformedResponse("DeepSeek returned no content".into()))
}

impl PromptTransport for DeepSeekClient {
    fn send_prompt(&self, system: &str, prompt: &str) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&chat_request(&self.model, system, prompt))
            .send()
            .map_err(|e| map_send_error(e, self.timeout_secs))?;

        let parsed: ChatResponse = ensure_success(response)?
            .json()
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        first_choice_text(parsed)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
