use serde_json::Map;

use super::document::{
    Component, DocumentData, DocumentMetadata, InterpretationDocument, DOCUMENT_VERSION,
    FALLBACK_GENERATOR,
};
use crate::divination::DivinationResult;

pub const FALLBACK_ROOT: &str = "fallback-root";

const PENDING_LABEL: &str = "待解读";
const UNAVAILABLE_NOTICE: &str =
    "AI 服务暂时不可用，显示基础卦象信息。请稍后重试获取详细解读。";

fn overview_text(divination: &DivinationResult) -> String {
    let hexagram = &divination.original_hexagram;
    let mut text = format!(
        "您所得之卦为「{}」。上卦为{}，代表{}；下卦为{}，代表{}。卦辞：{}",
        hexagram.name,
        hexagram.upper_trigram.name,
        hexagram.upper_trigram.nature,
        hexagram.lower_trigram.name,
        hexagram.lower_trigram.nature,
        hexagram.judgment,
    );
    if let Some(changed) = &divination.changed_hexagram {
        text.push_str(&format!("。变卦为「{}」，卦辞：{}", changed.name, changed.judgment));
    }
    text
}

/// Minimal document built from the cast alone, used whenever no provider
/// output is available. Equal input gives an identical document.
pub fn build_fallback_document(
    question: &str,
    divination: &DivinationResult,
) -> InterpretationDocument {
    let overview = overview_text(divination);

    let components = vec![
        Component::card("card-overview", "📖 卦象总论", "elevated", &["text-overview"]),
        Component::text("text-overview", &overview, "body"),
        Component::card("card-fortune", "⚖️ 吉凶判断", "highlighted", &["badge-fortune"]),
        Component::badge("badge-fortune", PENDING_LABEL, "info"),
        Component::card("card-warning", "⚠️ 提示", "warning", &["text-warning"]),
        Component::text("text-warning", UNAVAILABLE_NOTICE, "body"),
    ];

    InterpretationDocument {
        version: DOCUMENT_VERSION.to_string(),
        root: FALLBACK_ROOT.to_string(),
        components,
        data: DocumentData::from_divination(question, divination),
        metadata: DocumentMetadata {
            hexagram_name: divination.original_hexagram.name.clone(),
            question: question.to_string(),
            generated_by: FALLBACK_GENERATOR.to_string(),
            is_native_a2ui: false,
            extra: Map::new(),
        },
    }
}
