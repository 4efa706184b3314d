//! Provider transport abstraction and shared HTTP plumbing.

use std::time::Duration;

use super::ProviderError;

/// Sends one prompt to a language-model provider and returns its raw text.
///
/// Implementations only move text; prompt building, parsing and fallback
/// live in the interpreter.
pub trait PromptTransport: Send + Sync {
    fn send_prompt(&self, system: &str, prompt: &str) -> Result<String, ProviderError>;

    /// Upstream model name, for logs.
    fn model_name(&self) -> &str;
}

/// Maximum characters of an upstream error body kept in errors and logs.
const MAX_ERROR_BODY_CHARS: usize = 320;

/// Blocking HTTP client with the given request timeout.
pub(crate) fn build_http_client(timeout_secs: u64) -> Result<reqwest::blocking::Client, ProviderError> {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| ProviderError::Transport(format!("Failed to create HTTP client: {e}")))
}

/// Map a reqwest send failure onto the provider error taxonomy.
pub(crate) fn map_send_error(e: reqwest::Error, timeout_secs: u64) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout(timeout_secs)
    } else {
        ProviderError::Transport(e.to_string())
    }
}

/// Map a non-success HTTP status onto the provider error taxonomy.
pub(crate) fn status_error(status: u16, body: &str) -> ProviderError {
    let body = truncate(body, MAX_ERROR_BODY_CHARS);
    match status {
        401 | 403 => ProviderError::Authentication(body),
        429 => ProviderError::Quota(body),
        _ => ProviderError::Upstream { status, body },
    }
}

/// Check the response status, turning failures into `ProviderError`.
pub(crate) fn ensure_success(
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(status_error(status.as_u16(), &body))
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}

/// Scripted transport for tests.
#[cfg(test)]
pub(crate) struct MockTransport {
    reply: Result<String, ProviderError>,
    calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MockTransport {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn failing(error: ProviderError) -> Self {
        Self {
            reply: Err(error),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
impl PromptTransport for MockTransport {
    fn send_prompt(&self, _system: &str, _prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.reply.clone()
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_statuses_map_to_authentication() {
        assert!(matches!(status_error(401, "bad key"), ProviderError::Authentication(_)));
        assert!(matches!(status_error(403, ""), ProviderError::Authentication(_)));
    }

    #[test]
    fn rate_limit_maps_to_quota() {
        assert!(matches!(status_error(429, "slow down"), ProviderError::Quota(_)));
    }

    #[test]
    fn other_statuses_keep_code() {
        match status_error(503, "overloaded") {
            ProviderError::Upstream { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "overloaded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("卦象解读", 2), "卦象…");
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn mock_transport_counts_calls() {
        let mock = MockTransport::replying("{}");
        assert_eq!(mock.send_prompt("s", "p").unwrap(), "{}");
        assert_eq!(mock.send_prompt("s", "p").unwrap(), "{}");
        assert_eq!(mock.call_count(), 2);
    }

    #[test]
    fn http_client_builds() {
        assert!(build_http_client(5).is_ok());
    }
}
