use serde::{Deserialize, Serialize};

use super::tables::TrigramKind;

/// Traditional labels for the six line positions, bottom to top.
pub const POSITION_NAMES: [&str; 6] = ["初爻", "二爻", "三爻", "四爻", "五爻", "上爻"];

/// Ordinal label for a 1-based line position. Out-of-range positions get an empty label.
pub fn position_name(position: u8) -> &'static str {
    usize::from(position)
        .checked_sub(1)
        .and_then(|i| POSITION_NAMES.get(i))
        .copied()
        .unwrap_or("")
}

// ═══════════════════════════════════════════════════════════
// Lines
// ═══════════════════════════════════════════════════════════

/// Kind of line produced by one throw of three coins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// Three heads (9): solid, changing to broken.
    OldYang,
    /// Two heads (7): solid, stable.
    YoungYang,
    /// One head (8): broken, stable.
    YoungYin,
    /// No heads (6): broken, changing to solid.
    OldYin,
}

impl LineKind {
    /// Classify a throw by the number of heads among its three coins.
    pub fn from_heads(heads: usize) -> Self {
        match heads {
            3.. => Self::OldYang,
            2 => Self::YoungYang,
            1 => Self::YoungYin,
            0 => Self::OldYin,
        }
    }

    pub fn value(self) -> u8 {
        match self {
            Self::OldYang | Self::YoungYang => 1,
            Self::YoungYin | Self::OldYin => 0,
        }
    }

    pub fn is_changing(self) -> bool {
        matches!(self, Self::OldYang | Self::OldYin)
    }

    /// Value the line takes in the changed hexagram. Stable lines keep their value.
    pub fn changed_value(self) -> u8 {
        match self {
            Self::OldYang => 0,
            Self::YoungYang => 1,
            Self::YoungYin => 0,
            Self::OldYin => 1,
        }
    }

    /// Ritual number of the line (6, 7, 8 or 9).
    pub fn number(self) -> u8 {
        match self {
            Self::OldYang => 9,
            Self::YoungYang => 7,
            Self::YoungYin => 8,
            Self::OldYin => 6,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::OldYang => "老阳",
            Self::YoungYang => "少阳",
            Self::YoungYin => "少阴",
            Self::OldYin => "老阴",
        }
    }

    pub fn symbol(self) -> &'static str {
        if self.value() == 1 {
            "⚊"
        } else {
            "⚋"
        }
    }
}

/// One of the six lines of a cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub value: u8,
    #[serde(rename = "type")]
    pub kind: LineKind,
    pub name: String,
    pub symbol: String,
    pub number: u8,
    pub changing: bool,
    pub changed_value: u8,
    /// 1-based, bottom to top.
    pub position: u8,
    pub position_name: String,
}

// ═══════════════════════════════════════════════════════════
// Trigrams and hexagrams
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigram {
    pub name: String,
    pub pinyin: String,
    pub symbol: String,
    pub nature: String,
    pub attribute: String,
}

impl From<TrigramKind> for Trigram {
    fn from(kind: TrigramKind) -> Self {
        Self {
            name: kind.name().to_string(),
            pinyin: kind.pinyin().to_string(),
            symbol: kind.symbol().to_string(),
            nature: kind.nature().to_string(),
            attribute: kind.attribute().to_string(),
        }
    }
}

/// Name, sequence number and judgment of a hexagram, before trigrams are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexagramInfo {
    pub name: String,
    pub number: u8,
    pub judgment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hexagram {
    pub name: String,
    /// King Wen sequence number, 0 for a placeholder.
    pub number: u8,
    pub judgment: String,
    pub upper_trigram: Trigram,
    pub lower_trigram: Trigram,
    /// Line values, bottom to top.
    pub lines: [u8; 6],
}

impl Hexagram {
    /// English image of the hexagram, e.g. "Earth over Heaven".
    pub fn image(&self) -> String {
        let lower = TrigramKind::from_lines([self.lines[0], self.lines[1], self.lines[2]]);
        let upper = TrigramKind::from_lines([self.lines[3], self.lines[4], self.lines[5]]);
        format!("{} over {}", upper.english_image(), lower.english_image())
    }
}

/// Complete outcome of one cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DivinationResult {
    pub original_hexagram: Hexagram,
    /// Index 0 is the bottom line.
    pub lines: Vec<Line>,
    pub has_changing_lines: bool,
    /// Present iff `has_changing_lines`.
    pub changed_hexagram: Option<Hexagram>,
}

impl DivinationResult {
    pub fn changing_lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter().filter(|l| l.changing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_names_cover_six_lines() {
        assert_eq!(position_name(1), "初爻");
        assert_eq!(position_name(6), "上爻");
        assert_eq!(position_name(0), "");
        assert_eq!(position_name(7), "");
    }

    #[test]
    fn line_kind_serializes_snake_case() {
        let json = serde_json::to_string(&LineKind::OldYang).unwrap();
        assert_eq!(json, "\"old_yang\"");
        let json = serde_json::to_string(&LineKind::YoungYin).unwrap();
        assert_eq!(json, "\"young_yin\"");
    }

    #[test]
    fn line_serializes_camel_case_fields() {
        let line = Line {
            value: 0,
            kind: LineKind::OldYin,
            name: "老阴".into(),
            symbol: "⚋".into(),
            number: 6,
            changing: true,
            changed_value: 1,
            position: 2,
            position_name: "二爻".into(),
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["type"], "old_yin");
        assert_eq!(json["changedValue"], 1);
        assert_eq!(json["positionName"], "二爻");
    }

    #[test]
    fn symbols_follow_line_value() {
        assert_eq!(LineKind::OldYang.symbol(), "⚊");
        assert_eq!(LineKind::YoungYang.symbol(), "⚊");
        assert_eq!(LineKind::YoungYin.symbol(), "⚋");
        assert_eq!(LineKind::OldYin.symbol(), "⚋");
    }
}
