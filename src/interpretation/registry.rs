//! Provider selection: identifier → shared `Interpreter`.
//!
//! Each provider slot is a `OnceLock`: the first caller builds the instance,
//! concurrent first callers wait on it, later reads take no lock.

use std::sync::{Arc, OnceLock};

use super::deepseek::DeepSeekClient;
use super::gemini::GeminiClient;
use super::interaction_log::InteractionLog;
use super::interpreter::Interpreter;
use super::provider::{ModelInfo, ProviderId};
use super::transport::PromptTransport;
use super::RegistryError;
use crate::config::ProviderSettings;

/// Builds the transport for a provider, or `None` when it has no credentials.
pub type TransportFactory =
    Box<dyn Fn(ProviderId) -> Option<Box<dyn PromptTransport>> + Send + Sync>;

pub struct ProviderRegistry {
    factory: TransportFactory,
    log: InteractionLog,
    slots: [OnceLock<Arc<Interpreter>>; ProviderId::ALL.len()],
}

impl ProviderRegistry {
    /// Registry building real HTTP transports from `settings`.
    pub fn new(settings: ProviderSettings, log: InteractionLog) -> Self {
        Self::with_factory(
            Box::new(move |provider| build_transport(&settings, provider)),
            log,
        )
    }

    pub fn with_factory(factory: TransportFactory, log: InteractionLog) -> Self {
        Self {
            factory,
            log,
            slots: Default::default(),
        }
    }

    /// Resolve a caller-supplied identifier (case-insensitive).
    pub fn select(&self, id: &str) -> Result<Arc<Interpreter>, RegistryError> {
        let provider: ProviderId = id.parse()?;
        Ok(self.get(provider))
    }

    /// The interpreter for `provider`, built on first use.
    pub fn get(&self, provider: ProviderId) -> Arc<Interpreter> {
        self.slots[provider.index()]
            .get_or_init(|| {
                let transport = (self.factory)(provider);
                tracing::info!(
                    provider = %provider,
                    configured = transport.is_some(),
                    "Interpreter initialized"
                );
                Arc::new(Interpreter::new(provider, transport, self.log.clone()))
            })
            .clone()
    }

    pub fn models(&self) -> Vec<ModelInfo> {
        super::provider::available_models()
    }
}

fn build_transport(
    settings: &ProviderSettings,
    provider: ProviderId,
) -> Option<Box<dyn PromptTransport>> {
    let built = match provider {
        ProviderId::Gemini => {
            let key = settings.gemini_api_key.as_deref()?;
            GeminiClient::new(
                &settings.gemini_base_url,
                &settings.gemini_model,
                key,
                settings.timeout_secs,
            )
            .map(|c| Box::new(c) as Box<dyn PromptTransport>)
        }
        ProviderId::DeepSeek => {
            let key = settings.deepseek_api_key.as_deref()?;
            DeepSeekClient::new(
                &settings.deepseek_base_url,
                &settings.deepseek_model,
                key,
                settings.timeout_secs,
            )
            .map(|c| Box::new(c) as Box<dyn PromptTransport>)
        }
    };

    match built {
        Ok(transport) => Some(transport),
        Err(e) => {
            tracing::warn!(provider = %provider, error = %e, "Failed to build provider transport");
            None
        }
    }
}
