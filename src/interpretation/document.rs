//! A2UI interpretation document: a flat list of components linked by id,
//! plus the cast data and metadata the renderer needs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::divination::{DivinationResult, Hexagram, Line};

/// Schema version written into every document.
pub const DOCUMENT_VERSION: &str = "1.0";

/// `generatedBy` value of documents built without a provider.
pub const FALLBACK_GENERATOR: &str = "fallback";

/// Component types the renderer understands.
pub mod component_type {
    pub const CARD: &str = "card";
    pub const TEXT: &str = "text";
    pub const BADGE: &str = "badge";
    pub const LIST: &str = "list";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpretationDocument {
    pub version: String,
    /// Id of the root component.
    pub root: String,
    pub components: Vec<Component>,
    pub data: DocumentData,
    pub metadata: DocumentMetadata,
}

impl InterpretationDocument {
    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn is_native(&self) -> bool {
        self.metadata.is_native_a2ui
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub props: Map<String, Value>,
    /// Ids of child components, in render order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
}

impl Component {
    fn new(id: &str, kind: &str, props: Map<String, Value>, children: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            kind: kind.to_string(),
            props,
            children: children.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn card(id: &str, title: &str, variant: &str, children: &[&str]) -> Self {
        Self::new(
            id,
            component_type::CARD,
            props([("title", title.into()), ("variant", variant.into())]),
            children,
        )
    }

    pub fn text(id: &str, content: &str, variant: &str) -> Self {
        Self::new(
            id,
            component_type::TEXT,
            props([("content", content.into()), ("variant", variant.into())]),
            &[],
        )
    }

    pub fn badge(id: &str, label: &str, color: &str) -> Self {
        Self::new(
            id,
            component_type::BADGE,
            props([("label", label.into()), ("color", color.into())]),
            &[],
        )
    }

    pub fn list(id: &str, items: &[&str], ordered: bool) -> Self {
        let items = items.iter().map(|i| Value::from(*i)).collect::<Vec<_>>();
        Self::new(
            id,
            component_type::LIST,
            props([("items", Value::Array(items)), ("ordered", ordered.into())]),
            &[],
        )
    }

    /// String-valued prop, if present.
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.props.get(key).and_then(Value::as_str)
    }
}

fn props<const N: usize>(entries: [(&str, Value); N]) -> Map<String, Value> {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// Cast data echoed into the document for rendering the figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentData {
    pub question: String,
    pub original_hexagram: Hexagram,
    pub changed_hexagram: Option<Hexagram>,
    pub lines: Vec<Line>,
}

impl DocumentData {
    pub fn from_divination(question: &str, divination: &DivinationResult) -> Self {
        Self {
            question: question.to_string(),
            original_hexagram: divination.original_hexagram.clone(),
            changed_hexagram: divination.changed_hexagram.clone(),
            lines: divination.lines.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub hexagram_name: String,
    pub question: String,
    pub generated_by: String,
    #[serde(rename = "isNativeA2UI")]
    pub is_native_a2ui: bool,
    /// Any further keys a provider put into its metadata.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
