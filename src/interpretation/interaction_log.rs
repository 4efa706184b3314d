//! Markdown audit trail of every interpretation request.
//!
//! One file per invocation: `{YYYYmmdd_HHMMSS_mmm}_{hexagram}_{provider}_{id8}.md`,
//! where `id8` is the first eight hex digits of the interaction id.
//! Writing never affects the response; failures surface as `tracing::warn!`.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use uuid::Uuid;

use super::document::{component_type, InterpretationDocument};
use super::provider::ProviderId;
use super::LogWriteError;
use crate::divination::{DivinationResult, Hexagram};

const NO_PROMPT: &str = "(no prompt sent)";
const NO_RESPONSE: &str = "(no response received)";

/// Everything recorded about one interpretation attempt.
pub struct InteractionRecord<'a> {
    pub interaction_id: Uuid,
    pub provider: ProviderId,
    /// Upstream model name, when a transport was used.
    pub model: Option<&'a str>,
    pub question: &'a str,
    pub divination: &'a DivinationResult,
    pub prompt: Option<&'a str>,
    pub raw_response: Option<&'a str>,
    pub document: &'a InterpretationDocument,
    pub success: bool,
    pub error: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct InteractionLog {
    dir: PathBuf,
}

impl InteractionLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write the record, returning the file path.
    pub fn write(&self, record: &InteractionRecord<'_>) -> Result<PathBuf, LogWriteError> {
        std::fs::create_dir_all(&self.dir).map_err(LogWriteError::Directory)?;

        let timestamp = Local::now();
        let path = self.dir.join(log_file_name(
            &timestamp,
            &record.divination.original_hexagram.name,
            record.provider,
            record.interaction_id,
        ));
        let content = render_markdown(record, &timestamp)?;
        std::fs::write(&path, content).map_err(LogWriteError::Write)?;
        Ok(path)
    }

    /// Write the record; failures are logged and swallowed.
    pub fn record(&self, record: &InteractionRecord<'_>) -> Option<PathBuf> {
        match self.write(record) {
            Ok(path) => {
                tracing::debug!(
                    interaction_id = %record.interaction_id,
                    path = %path.display(),
                    "Interaction log written"
                );
                Some(path)
            }
            Err(e) => {
                tracing::warn!(
                    interaction_id = %record.interaction_id,
                    dir = %self.dir.display(),
                    error = %e,
                    "Failed to write interaction log"
                );
                None
            }
        }
    }
}

fn log_file_name(
    timestamp: &DateTime<Local>,
    hexagram_name: &str,
    provider: ProviderId,
    interaction_id: Uuid,
) -> String {
    let hexagram = hexagram_name.replace(['/', '\\'], "_");
    let id = interaction_id.simple().to_string();
    format!(
        "{}_{}_{}_{}.md",
        timestamp.format("%Y%m%d_%H%M%S_%3f"),
        hexagram,
        provider.as_str(),
        &id[..8]
    )
}

/// Drop leading emoji and punctuation from a card title.
fn clean_title(title: &str) -> &str {
    title
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .trim()
}

/// Title → content pairs, one per card, in document order.
pub fn extract_sections(document: &InterpretationDocument) -> Vec<(String, String)> {
    document
        .components
        .iter()
        .filter(|c| c.kind == component_type::CARD)
        .map(|card| {
            let title = card
                .prop_str("title")
                .map(clean_title)
                .filter(|t| !t.is_empty())
                .unwrap_or(card.id.as_str())
                .to_string();

            let content = card
                .children
                .iter()
                .filter_map(|id| document.component(id))
                .filter_map(|child| match child.kind.as_str() {
                    component_type::TEXT => child.prop_str("content").map(str::to_string),
                    component_type::BADGE => child.prop_str("label").map(|l| format!("[{l}]")),
                    component_type::LIST => child.props.get("items").and_then(|v| v.as_array()).map(
                        |items| {
                            items
                                .iter()
                                .filter_map(|i| i.as_str())
                                .map(|i| format!("- {i}"))
                                .collect::<Vec<_>>()
                                .join("\n")
                        },
                    ),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("\n\n");

            (title, content)
        })
        .collect()
}

fn hexagram_table(out: &mut String, heading: &str, hexagram: &Hexagram) {
    let _ = writeln!(out, "### {heading}\n");
    let _ = writeln!(out, "| Field | Value |\n|------|------|");
    let _ = writeln!(out, "| **Name** | {} |", hexagram.name);
    let _ = writeln!(out, "| **Number** | {} |", hexagram.number);
    let _ = writeln!(out, "| **Judgment** | {} |", hexagram.judgment);
    let _ = writeln!(
        out,
        "| **Upper trigram** | {} ({}) - {} |",
        hexagram.upper_trigram.name, hexagram.upper_trigram.symbol, hexagram.upper_trigram.nature
    );
    let _ = writeln!(
        out,
        "| **Lower trigram** | {} ({}) - {} |\n",
        hexagram.lower_trigram.name, hexagram.lower_trigram.symbol, hexagram.lower_trigram.nature
    );
}

fn render_markdown(
    record: &InteractionRecord<'_>,
    timestamp: &DateTime<Local>,
) -> Result<String, LogWriteError> {
    let divination = record.divination;
    let mut out = String::new();

    // String writes are infallible
    let _ = writeln!(out, "# Interpretation Log\n\n## Summary\n");
    let _ = writeln!(out, "| Field | Value |\n|------|------|");
    let _ = writeln!(out, "| **Time** | {} |", timestamp.format("%Y-%m-%d %H:%M:%S%.3f"));
    let _ = writeln!(out, "| **Interaction** | {} |", record.interaction_id);
    let _ = writeln!(out, "| **Provider** | {} |", record.provider.display_name());
    if let Some(model) = record.model {
        let _ = writeln!(out, "| **Model** | {model} |");
    }
    let _ = writeln!(
        out,
        "| **Status** | {} |",
        if record.success { "success" } else { "failed" }
    );
    let _ = writeln!(out, "| **Hexagram** | {} |", divination.original_hexagram.name);
    if let Some(error) = record.error {
        let _ = writeln!(out, "| **Error** | {} |", error.replace('\n', " "));
    }

    let _ = writeln!(out, "\n---\n\n## Input\n\n### Question\n\n> {}\n", record.question);
    hexagram_table(&mut out, "Original hexagram", &divination.original_hexagram);
    if let Some(changed) = &divination.changed_hexagram {
        hexagram_table(&mut out, "Changed hexagram", changed);
    }

    let _ = writeln!(out, "### Lines\n\n| Position | Name | Symbol | Changing |\n|------|------|------|------|");
    for line in &divination.lines {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} |",
            line.position_name,
            line.name,
            line.symbol,
            if line.changing { "yes" } else { "no" }
        );
    }

    let _ = writeln!(
        out,
        "\n### Prompt\n\n```\n{}\n```\n\n---\n\n## Output\n\n### Raw response\n\n```\n{}\n```\n\n### Sections\n",
        record.prompt.unwrap_or(NO_PROMPT),
        record.raw_response.unwrap_or(NO_RESPONSE)
    );
    for (title, content) in extract_sections(record.document) {
        let _ = writeln!(out, "#### {title}\n\n{content}\n");
    }

    let json = serde_json::to_string_pretty(record.document)?;
    let _ = writeln!(out, "### Document (JSON)\n\n```json\n{json}\n```\n\n---\n");
    let _ = writeln!(out, "*Generated at {}*", timestamp.to_rfc3339());

    Ok(out)
}
