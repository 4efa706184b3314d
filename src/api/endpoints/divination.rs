//! Divination endpoints.
//!
//! - `GET /api/divination/methods`: divination method catalogue
//! - `GET /api/divination/models`: interpretation provider catalogue
//! - `POST /api/divination/liuyao`: cast a hexagram and interpret it

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::divination::{calculate_hexagram, CoinThrows, Hexagram, Line};
use crate::interpretation::{InterpretationDocument, ModelInfo, ProviderId};

#[derive(Debug, Clone, Serialize)]
pub struct DivinationMethod {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub available: bool,
}

const METHODS: [DivinationMethod; 4] = [
    DivinationMethod {
        id: "liuyao",
        name: "六爻占卜",
        description: "掷铜钱起卦，传统易经占卜术",
        icon: "🪙",
        available: true,
    },
    DivinationMethod {
        id: "meihua",
        name: "梅花易数",
        description: "以数起卦，简洁高效",
        icon: "🌸",
        available: false,
    },
    DivinationMethod {
        id: "bazi",
        name: "生辰八字",
        description: "根据出生时间推算命理",
        icon: "📅",
        available: false,
    },
    DivinationMethod {
        id: "qimen",
        name: "奇门遁甲",
        description: "古老的预测术数",
        icon: "🚪",
        available: false,
    },
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiuYaoRequest {
    pub question: String,
    /// Six throws of three coins, bottom line first. 1 = heads, 0 = tails.
    #[serde(alias = "coin_results")]
    pub coin_results: Vec<Vec<u8>>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiuYaoResponse {
    pub success: bool,
    pub original_hexagram: Hexagram,
    pub changed_hexagram: Option<Hexagram>,
    pub lines: Vec<Line>,
    pub a2ui_response: InterpretationDocument,
    pub model: ProviderId,
}

/// `GET /api/divination/methods`
pub async fn methods() -> Json<Vec<DivinationMethod>> {
    Json(METHODS.to_vec())
}

/// `GET /api/divination/models`
pub async fn models(State(ctx): State<ApiContext>) -> Json<Vec<ModelInfo>> {
    Json(ctx.registry.models())
}

/// Blank or missing model names select the default provider.
fn resolve_provider(model: Option<&str>) -> Result<ProviderId, ApiError> {
    match model.map(str::trim).filter(|m| !m.is_empty()) {
        Some(name) => Ok(name.parse::<ProviderId>()?),
        None => Ok(ProviderId::DEFAULT),
    }
}

/// `POST /api/divination/liuyao`: compute the cast and its interpretation.
///
/// Only contract errors (bad coins, unknown model, malformed body) fail the
/// request; provider trouble yields a fallback document.
pub async fn liuyao(
    State(ctx): State<ApiContext>,
    payload: Result<Json<LiuYaoRequest>, JsonRejection>,
) -> Result<Json<LiuYaoResponse>, ApiError> {
    let Json(req) = payload?;
    let throws = CoinThrows::try_from(req.coin_results)?;
    let provider = resolve_provider(req.model.as_deref())?;

    let divination = calculate_hexagram(throws.as_array());
    tracing::info!(
        provider = %provider,
        hexagram = %divination.original_hexagram.name,
        changing = divination.has_changing_lines,
        "Liu Yao cast computed"
    );

    // Provider transports are blocking clients
    let registry = ctx.registry.clone();
    let question = req.question;
    let cast = divination.clone();
    let document = tokio::task::spawn_blocking(move || {
        registry.get(provider).generate_interpretation(&question, &cast)
    })
    .await?;

    Ok(Json(LiuYaoResponse {
        success: true,
        original_hexagram: divination.original_hexagram,
        changed_hexagram: divination.changed_hexagram,
        lines: divination.lines,
        a2ui_response: document,
        model: provider,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_liuyao_is_available() {
        let available = METHODS.iter().filter(|m| m.available).map(|m| m.id).collect::<Vec<_>>();
        assert_eq!(available, vec!["liuyao"]);
    }

    #[test]
    fn request_accepts_both_key_styles() {
        let camel: LiuYaoRequest =
            serde_json::from_str(r#"{"question":"q","coinResults":[[1,0,1]]}"#).unwrap();
        let snake: LiuYaoRequest =
            serde_json::from_str(r#"{"question":"q","coin_results":[[1,0,1]],"model":"deepseek"}"#)
                .unwrap();
        assert_eq!(camel.coin_results, snake.coin_results);
        assert!(camel.model.is_none());
        assert_eq!(snake.model.as_deref(), Some("deepseek"));
    }

    #[test]
    fn blank_model_selects_default() {
        assert_eq!(resolve_provider(None).unwrap(), ProviderId::Gemini);
        assert_eq!(resolve_provider(Some("  ")).unwrap(), ProviderId::Gemini);
        assert_eq!(resolve_provider(Some("DeepSeek")).unwrap(), ProviderId::DeepSeek);
        assert!(resolve_provider(Some("gpt-4")).is_err());
    }
}
