//! Fixed catalogue of interpretation providers.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::RegistryError;

/// Providers that can narrate a cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Gemini,
    DeepSeek,
}

impl ProviderId {
    pub const ALL: [ProviderId; 2] = [Self::Gemini, Self::DeepSeek];

    /// Provider used when a request does not name one.
    pub const DEFAULT: ProviderId = Self::Gemini;

    /// Stable identifier used on the wire, in logs and in `generatedBy`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::DeepSeek => "deepseek",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Gemini => "Google Gemini",
            Self::DeepSeek => "DeepSeek",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Gemini => 0,
            Self::DeepSeek => 1,
        }
    }

    pub fn info(self) -> ModelInfo {
        match self {
            Self::Gemini => ModelInfo {
                id: self.as_str(),
                name: self.display_name(),
                description: "Google 最新的 AI 模型，响应快速",
                icon: "✨",
                default: self == Self::DEFAULT,
            },
            Self::DeepSeek => ModelInfo {
                id: self.as_str(),
                name: self.display_name(),
                description: "国产大模型，中文理解更优秀",
                icon: "🔮",
                default: self == Self::DEFAULT,
            },
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = RegistryError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RegistryError::UnknownProvider(s.to_string()))
    }
}

/// Display metadata for one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub default: bool,
}

/// Catalogue of all providers, in presentation order.
pub fn available_models() -> Vec<ModelInfo> {
    ProviderId::ALL.into_iter().map(ProviderId::info).collect()
}
