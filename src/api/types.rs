//! Shared types for the HTTP layer.

use std::sync::Arc;

use crate::interpretation::ProviderRegistry;

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub registry: Arc<ProviderRegistry>,
}

impl ApiContext {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }
}
