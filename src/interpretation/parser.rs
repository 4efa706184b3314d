use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::document::{
    Component, DocumentData, DocumentMetadata, InterpretationDocument, DOCUMENT_VERSION,
};
use super::ParseError;
use crate::divination::DivinationResult;

/// Greedy match: first `{` to last `}`, i.e. the largest brace-delimited block.
static BRACE_BLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

/// Metadata keys owned by the pipeline; provider values for them are replaced.
const MANAGED_METADATA_KEYS: [&str; 4] = ["hexagramName", "question", "generatedBy", "isNativeA2UI"];

/// Document as a provider may emit it. Everything is optional; `data` is ignored.
#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    version: Option<Value>,
    #[serde(default, alias = "rootComponentId", alias = "rootId")]
    root: Option<Value>,
    #[serde(default)]
    components: Vec<Value>,
    #[serde(default)]
    metadata: Option<Value>,
}

/// Parse provider text into a document and attach the locally computed cast.
///
/// 1. strip a surrounding code fence, parse the rest as JSON;
/// 2. failing that, parse the largest `{...}` block of the raw text;
/// 3. replace `data` and managed metadata with engine values.
pub fn parse_interpretation(
    raw_response: &str,
    question: &str,
    divination: &DivinationResult,
    generated_by: &str,
) -> Result<InterpretationDocument, ParseError> {
    let raw = extract_raw_document(raw_response)?;
    enrich(raw, question, divination, generated_by)
}

/// Remove a leading ```` ```json ```` / ```` ``` ```` and a trailing ```` ``` ````.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```JSON"))
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

fn parse_document(json_str: &str) -> Result<RawDocument, ParseError> {
    serde_json::from_str(json_str).map_err(|e| ParseError::InvalidJson(e.to_string()))
}

fn extract_raw_document(raw_response: &str) -> Result<RawDocument, ParseError> {
    let direct_error = match parse_document(strip_code_fence(raw_response)) {
        Ok(raw) => return Ok(raw),
        Err(e) => e,
    };

    tracing::debug!(error = %direct_error, "Direct parse failed, scanning for brace block");

    let block = BRACE_BLOCK
        .find(raw_response)
        .ok_or(ParseError::NoJsonObject)?;
    parse_document(block.as_str())
}

/// Parse components leniently: entries without an id or type are skipped.
fn parse_components(items: Vec<Value>) -> Vec<Component> {
    items
        .into_iter()
        .filter_map(|v| serde_json::from_value::<Component>(v).ok())
        .filter(|c| !c.id.trim().is_empty() && !c.kind.trim().is_empty())
        .collect()
}

fn version_string(version: Option<Value>) -> String {
    match version {
        Some(Value::String(s)) if !s.trim().is_empty() => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => DOCUMENT_VERSION.to_string(),
    }
}

/// String or numeric root ids are accepted; anything else falls back to the first component.
fn root_id(root: Option<Value>) -> Option<String> {
    match root {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Non-object metadata is dropped rather than failing the document.
fn metadata_map(metadata: Option<Value>) -> Map<String, Value> {
    match metadata {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

fn enrich(
    raw: RawDocument,
    question: &str,
    divination: &DivinationResult,
    generated_by: &str,
) -> Result<InterpretationDocument, ParseError> {
    let components = parse_components(raw.components);
    let first_id = components
        .first()
        .map(|c| c.id.clone())
        .ok_or(ParseError::NoComponents)?;

    let root = root_id(raw.root).unwrap_or(first_id);

    let mut extra = metadata_map(raw.metadata);
    for key in MANAGED_METADATA_KEYS {
        extra.remove(key);
    }

    Ok(InterpretationDocument {
        version: version_string(raw.version),
        root,
        components,
        data: DocumentData::from_divination(question, divination),
        metadata: DocumentMetadata {
            hexagram_name: divination.original_hexagram.name.clone(),
            question: question.to_string(),
            generated_by: generated_by.to_string(),
            is_native_a2ui: true,
            extra,
        },
    })
}
