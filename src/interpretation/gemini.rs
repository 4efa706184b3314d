use serde_json::{json, Value};

use super::transport::{build_http_client, ensure_success, map_send_error, PromptTransport};
use super::ProviderError;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Google Gemini `generateContent` client.
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GeminiClient {
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
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

/// Request body for `generateContent`.
fn request_body(system: &str, prompt: &str) -> Value {
    let mut body = json!({
        "contents": [
            { "role": "user", "parts": [{ "text": prompt }] }
        ],
        "generationConfig": { "temperature": 0.7 }
    });
    if !system.trim().is_empty() {
        body["systemInstruction"] = json!({ "parts": [{ "text": system }] });
    }
    body
}

/// Join the text parts of the first candidate.
fn extract_candidate_text(body: &Value) -> Option<String> {
    let parts = body["candidates"]
        .as_array()?
        .first()?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let text = parts
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect::<Vec<_>>()
        .join("");

    (!text.trim().is_empty()).then_some(text)
}

impl PromptTransport for GeminiClient {
    fn send_prompt(&self, system: &str, prompt: &str) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(system, prompt))
            .send()
            .map_err(|e| map_send_error(e, self.timeout_secs))?;

        let body: Value = ensure_success(response)?
            .json()
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        extract_candidate_text(&body).ok_or_else(|| {
            let reason = body["candidates"][0]["finishReason"]
                .as_str()
                .or_else(|| body["promptFeedback"]["blockReason"].as_str())
                .unwrap_or("no text candidates");
            ProviderError::MalformedResponse(format!("Gemini returned no text ({reason})"))
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
