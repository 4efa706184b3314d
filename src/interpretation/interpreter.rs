use uuid::Uuid;

use super::document::InterpretationDocument;
use super::fallback::build_fallback_document;
use super::interaction_log::{InteractionLog, InteractionRecord};
use super::parser::parse_interpretation;
use super::prompt::{build_interpretation_prompt, INTERPRETATION_SYSTEM_PROMPT};
use super::provider::ProviderId;
use super::transport::PromptTransport;
use crate::divination::DivinationResult;

/// Error text recorded when a provider has no credentials.
pub const NOT_CONFIGURED_NOTE: &str = "provider not configured; fallback document returned";

/// Orchestrates one provider's interpretation pipeline:
/// prompt → transport → parse → (fallback) → interaction log
pub struct Interpreter {
    provider: ProviderId,
    transport: Option<Box<dyn PromptTransport>>,
    log: InteractionLog,
}

impl Interpreter {
    /// `transport` is `None` when the provider has no credentials.
    pub fn new(
        provider: ProviderId,
        transport: Option<Box<dyn PromptTransport>>,
        log: InteractionLog,
    ) -> Self {
        Self {
            provider,
            transport,
            log,
        }
    }

    pub fn provider(&self) -> ProviderId {
        self.provider
    }

    pub fn is_configured(&self) -> bool {
        self.transport.is_some()
    }

    /// Produce a renderable document for the cast. Never fails: provider and
    /// parse errors degrade to the fallback document and are only recorded.
    pub fn generate_interpretation(
        &self,
        question: &str,
        divination: &DivinationResult,
    ) -> InterpretationDocument {
        let interaction_id = Uuid::new_v4();
        let _span = tracing::info_span!(
            "generate_interpretation",
            interaction_id = %interaction_id,
            provider = %self.provider,
            hexagram = %divination.original_hexagram.name,
        )
        .entered();

        let Some(transport) = self.transport.as_deref() else {
            tracing::info!("Provider not configured, returning fallback document");
            let document = build_fallback_document(question, divination);
            self.log.record(&InteractionRecord {
                interaction_id,
                provider: self.provider,
                model: None,
                question,
                divination,
                prompt: None,
                raw_response: None,
                document: &document,
                success: true,
                error: Some(NOT_CONFIGURED_NOTE),
            });
            return document;
        };

        let prompt = build_interpretation_prompt(question, divination, self.provider.as_str());
        let start = std::time::Instant::now();

        let (document, raw_response, error) =
            match transport.send_prompt(INTERPRETATION_SYSTEM_PROMPT, &prompt) {
                Ok(raw) => {
                    match parse_interpretation(&raw, question, divination, self.provider.as_str()) {
                        Ok(document) => {
                            tracing::info!(
                                components = document.components.len(),
                                elapsed_ms = start.elapsed().as_millis() as u64,
                                "Interpretation parsed"
                            );
                            (document, Some(raw), None)
                        }
                        Err(e) => {
                            tracing::warn!(
                                error = %e,
                                response_len = raw.len(),
                                "Provider response unparseable, using fallback"
                            );
                            (
                                build_fallback_document(question, divination),
                                Some(raw),
                                Some(e.to_string()),
                            )
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "Provider call failed, using fallback"
                    );
                    (
                        build_fallback_document(question, divination),
                        None,
                        Some(e.to_string()),
                    )
                }
            };

        self.log.record(&InteractionRecord {
            interaction_id,
            provider: self.provider,
            model: Some(transport.model_name()),
            question,
            divination,
            prompt: Some(&prompt),
            raw_response: raw_response.as_deref(),
            document: &document,
            success: error.is_none(),
            error: error.as_deref(),
        });

        document
    }
}
