//! AI interpretation pipeline.
//!
//! prompt → provider transport → tolerant parse → (fallback) → interaction log.
//! `Interpreter::generate_interpretation` always yields a renderable document;
//! provider and parse failures only show up in the interaction log and traces.

pub mod deepseek;
pub mod document;
pub mod fallback;
pub mod gemini;
pub mod interaction_log;
pub mod interpreter;
pub mod parser;
pub mod prompt;
pub mod provider;
pub mod registry;
pub mod transport;

pub use document::*;
pub use fallback::build_fallback_document;
pub use interaction_log::{InteractionLog, InteractionRecord};
pub use interpreter::Interpreter;
pub use parser::parse_interpretation;
pub use prompt::{build_interpretation_prompt, INTERPRETATION_SYSTEM_PROMPT};
pub use provider::{available_models, ModelInfo, ProviderId};
pub use registry::ProviderRegistry;
pub use transport::PromptTransport;

use thiserror::Error;

/// Failure reaching or talking to a provider. Always recovered by fallback.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Provider rejected credentials: {0}")]
    Authentication(String),

    #[error("Provider unreachable: {0}")]
    Transport(String),

    #[error("Provider quota exhausted: {0}")]
    Quota(String),

    #[error("Provider request timed out after {0}s")]
    Timeout(u64),

    #[error("Provider returned error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

/// Provider text that could not be recovered into a document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("No JSON object found in provider response")]
    NoJsonObject,

    #[error("JSON parsing error: {0}")]
    InvalidJson(String),

    #[error("Document has no usable components")]
    NoComponents,
}

/// Interaction log could not be persisted. Recovered at the log boundary.
#[derive(Error, Debug)]
pub enum LogWriteError {
    #[error("Log directory unavailable: {0}")]
    Directory(std::io::Error),

    #[error("Failed to write interaction log: {0}")]
    Write(std::io::Error),

    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Provider selection failures (caller contract errors).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Unsupported model: {0} (available: gemini, deepseek)")]
    UnknownProvider(String),
}
