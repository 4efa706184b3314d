use crate::divination::{DivinationResult, Hexagram};

pub const INTERPRETATION_SYSTEM_PROMPT: &str = r#"
You are an experienced I Ching (Zhou Yi) diviner who explains Liu Yao casts in
plain, warm language, like an elder talking a younger relative through a
decision.

RULES:
1. Output ONLY one JSON object in the A2UI format described in the request.
2. The JSON must be valid and directly parseable. No text before or after it.
3. Answer in the same language as the seeker's question.
4. Ground every statement in the hexagram data provided. Do not invent lines.
"#;

/// Output contract appended to every prompt.
const OUTPUT_FORMAT_INSTRUCTIONS: &str = r#"
## Output format (A2UI)

Return a single JSON object with exactly this shape. Component types are
limited to: card, text, badge, list. Keep every id shown below; cards list
their children by id.

```json
{
  "version": "1.0",
  "root": "interpretation-root",
  "components": [
    {"id": "card-overview", "type": "card", "props": {"title": "📖 Overview", "variant": "elevated"}, "children": ["text-overview"]},
    {"id": "text-overview", "type": "text", "props": {"content": "Two or three paragraphs on the core meaning of the hexagram, with an everyday analogy.", "variant": "body"}},
    {"id": "card-interpretation", "type": "card", "props": {"title": "🔮 Plain Reading", "variant": "default"}, "children": ["text-interpretation"]},
    {"id": "text-interpretation", "type": "text", "props": {"content": "For the question: 1. current situation 2. how things develop 3. likely outcome 4. detailed analysis. At least 200 words.", "variant": "body"}},
    {"id": "card-fortune", "type": "card", "props": {"title": "⚖️ Fortune", "variant": "highlighted"}, "children": ["badge-fortune", "text-fortune-reason"]},
    {"id": "badge-fortune", "type": "badge", "props": {"label": "auspicious / inauspicious / mixed", "color": "success | warning | error | info"}},
    {"id": "text-fortune-reason", "type": "text", "props": {"content": "One sentence explaining the verdict.", "variant": "caption"}},
    {"id": "card-advice", "type": "card", "props": {"title": "💡 Advice", "variant": "default"}, "children": ["list-advice"]},
    {"id": "list-advice", "type": "list", "props": {"items": ["a concrete step", "good timing", "who can help", "what to avoid"], "ordered": true}},
    {"id": "card-warning", "type": "card", "props": {"title": "⚠️ Caution", "variant": "warning"}, "children": ["text-warning"]},
    {"id": "text-warning", "type": "text", "props": {"content": "Traps or risks to watch out for.", "variant": "body"}}
  ],
  "metadata": {
    "hexagramName": "<hexagram name>",
    "question": "<the question>",
    "generatedBy": "<provider>"
  }
}
```
"#;

fn trigram_line(label: &str, hexagram: &Hexagram, upper: bool) -> String {
    let trigram = if upper {
        &hexagram.upper_trigram
    } else {
        &hexagram.lower_trigram
    };
    format!(
        "**{label}**: {} {} ({}, {}, {})",
        trigram.name, trigram.symbol, trigram.pinyin, trigram.nature, trigram.attribute
    )
}

/// Render the user prompt for one cast.
///
/// The changed hexagram section only appears when lines are changing.
pub fn build_interpretation_prompt(
    question: &str,
    divination: &DivinationResult,
    generated_by: &str,
) -> String {
    let original = &divination.original_hexagram;

    let lines_info = divination
        .lines
        .iter()
        .map(|line| {
            let marker = if line.changing { " 【changing】" } else { "" };
            format!(
                "- {}: {} ({}){marker}",
                line.position_name, line.name, line.symbol
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let changing_positions = divination
        .changing_lines()
        .map(|l| l.position_name.as_str())
        .collect::<Vec<_>>();
    let changing_info = if changing_positions.is_empty() {
        "No changing lines.".to_string()
    } else {
        format!("Changing lines: {}", changing_positions.join(", "))
    };

    let changed_info = match &divination.changed_hexagram {
        Some(changed) if divination.has_changing_lines => format!(
            "\n**Changed hexagram**: {} (No. {}, {})\n**Changed judgment**: {}\n",
            changed.name,
            changed.number,
            changed.image(),
            changed.judgment
        ),
        _ => String::new(),
    };

    format!(
        r#"Interpret the following Liu Yao cast and output A2UI JSON.

## Cast

**Question**: {question}

**Hexagram**: {name} (No. {number}, {image})
**Judgment**: {judgment}
{upper}
{lower}

**Lines (bottom to top)**:
{lines_info}

{changing_info}
{changed_info}{format}
Use "{hexagram_name}" as metadata.hexagramName, the question above verbatim as
metadata.question, and "{generated_by}" as metadata.generatedBy.
"#,
        name = original.name,
        number = original.number,
        image = original.image(),
        judgment = original.judgment,
        upper = trigram_line("Upper trigram", original, true),
        lower = trigram_line("Lower trigram", original, false),
        format = OUTPUT_FORMAT_INSTRUCTIONS,
        hexagram_name = original.name,
    )
}
