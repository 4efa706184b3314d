use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::interpretation::deepseek::{DEFAULT_DEEPSEEK_BASE_URL, DEFAULT_DEEPSEEK_MODEL};
use crate::interpretation::gemini::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};

/// Application-level constants
pub const APP_NAME: &str = "LiuYao";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 120;

/// Get the application data directory
/// ~/LiuYao/ when a home directory exists, `./LiuYao` otherwise
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Default directory for interaction logs
pub fn interaction_log_dir() -> PathBuf {
    app_data_dir().join("ai_logs")
}

/// Tracing filter used when `RUST_LOG` is unset
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "liuyao=debug,tower_http=debug,info"
    } else {
        "liuyao=info,warn"
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Credentials and endpoints for the interpretation providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub timeout_secs: u64,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub deepseek_api_key: Option<String>,
    pub deepseek_base_url: String,
    pub deepseek_model: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_PROVIDER_TIMEOUT_SECS,
            gemini_api_key: None,
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            deepseek_api_key: None,
            deepseek_base_url: DEFAULT_DEEPSEEK_BASE_URL.to_string(),
            deepseek_model: DEFAULT_DEEPSEEK_MODEL.to_string(),
        }
    }
}

/// Service configuration resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    pub log_dir: PathBuf,
    pub providers: ProviderSettings,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bind_raw = get("LIUYAO_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidValue {
                key: "LIUYAO_BIND_ADDR",
                value: bind_raw.clone(),
            })?;

        let timeout_secs = match get("LIUYAO_PROVIDER_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidValue {
                    key: "LIUYAO_PROVIDER_TIMEOUT_SECS",
                    value: raw,
                })?,
            None => DEFAULT_PROVIDER_TIMEOUT_SECS,
        };

        let defaults = ProviderSettings::default();
        let providers = ProviderSettings {
            timeout_secs,
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_base_url: get("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            gemini_model: get("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            deepseek_api_key: get("DEEPSEEK_API_KEY"),
            deepseek_base_url: get("DEEPSEEK_BASE_URL").unwrap_or(defaults.deepseek_base_url),
            deepseek_model: get("DEEPSEEK_MODEL").unwrap_or(defaults.deepseek_model),
        };

        Ok(Self {
            bind_addr,
            log_dir: get("LIUYAO_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(interaction_log_dir),
            providers,
        })
    }
}
