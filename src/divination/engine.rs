use super::tables::{hexagram_entry, TrigramKind};
use super::types::{position_name, DivinationResult, Hexagram, HexagramInfo, Line, LineKind, Trigram};

/// Judgment text used when a trigram pair is missing from the table.
pub const PLACEHOLDER_JUDGMENT: &str = "卦辞待查";

/// Compute one line from three coins (1 = heads, 0 = tails).
///
/// The returned line has no position yet (`position` 0, empty label).
pub fn calculate_line(coins: [u8; 3]) -> Line {
    let heads = coins.iter().filter(|&&c| c == 1).count();
    let kind = LineKind::from_heads(heads);

    Line {
        value: kind.value(),
        kind,
        name: kind.name().to_string(),
        symbol: kind.symbol().to_string(),
        number: kind.number(),
        changing: kind.is_changing(),
        changed_value: kind.changed_value(),
        position: 0,
        position_name: String::new(),
    }
}

/// Trigram formed by three line values, bottom line first.
pub fn get_trigram(lines: [u8; 3]) -> Trigram {
    TrigramKind::from_lines(lines).into()
}

/// Hexagram base fields for an (upper, lower) pair of trigram names.
///
/// Names outside the eight trigrams produce a placeholder (number 0) instead
/// of an error.
pub fn get_hexagram(upper_name: &str, lower_name: &str) -> HexagramInfo {
    match (
        TrigramKind::from_name(upper_name),
        TrigramKind::from_name(lower_name),
    ) {
        (Some(upper), Some(lower)) => {
            let entry = hexagram_entry(upper, lower);
            HexagramInfo {
                name: entry.name.to_string(),
                number: entry.number,
                judgment: entry.judgment.to_string(),
            }
        }
        _ => {
            tracing::warn!(
                upper = upper_name,
                lower = lower_name,
                "Hexagram lookup miss, using placeholder"
            );
            HexagramInfo {
                name: format!("{upper_name}{lower_name}卦"),
                number: 0,
                judgment: PLACEHOLDER_JUDGMENT.to_string(),
            }
        }
    }
}

/// Build a full hexagram from six line values, bottom to top.
fn hexagram_from_values(values: [u8; 6]) -> Hexagram {
    let lower_trigram = get_trigram([values[0], values[1], values[2]]);
    let upper_trigram = get_trigram([values[3], values[4], values[5]]);
    let info = get_hexagram(&upper_trigram.name, &lower_trigram.name);

    Hexagram {
        name: info.name,
        number: info.number,
        judgment: info.judgment,
        upper_trigram,
        lower_trigram,
        lines: values,
    }
}

/// Compute the complete cast from six throws, first throw = bottom line.
pub fn calculate_hexagram(throws: &[[u8; 3]; 6]) -> DivinationResult {
    let lines: Vec<Line> = throws
        .iter()
        .zip(1u8..)
        .map(|(coins, position)| Line {
            position,
            position_name: position_name(position).to_string(),
            ..calculate_line(*coins)
        })
        .collect();

    let original_values: [u8; 6] = std::array::from_fn(|i| lines[i].value);
    let original_hexagram = hexagram_from_values(original_values);

    let has_changing_lines = lines.iter().any(|l| l.changing);
    let changed_hexagram = has_changing_lines.then(|| {
        let changed_values: [u8; 6] = std::array::from_fn(|i| lines[i].changed_value);
        hexagram_from_values(changed_values)
    });

    DivinationResult {
        original_hexagram,
        lines,
        has_changing_lines,
        changed_hexagram,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn all_triples() -> Vec<[u8; 3]> {
        (0u8..8)
            .map(|bits| [bits & 1, (bits >> 1) & 1, (bits >> 2) & 1])
            .collect()
    }

    #[test]
    fn calculate_line_follows_heads_table() {
        for coins in all_triples() {
            let heads = coins.iter().filter(|&&c| c == 1).count();
            let line = calculate_line(coins);
            let expected = match heads {
                3 => (LineKind::OldYang, 1, true, 0),
                2 => (LineKind::YoungYang, 1, false, 1),
                1 => (LineKind::YoungYin, 0, false, 0),
                _ => (LineKind::OldYin, 0, true, 1),
            };
            assert_eq!(
                (line.kind, line.value, line.changing, line.changed_value),
                expected,
                "coins {coins:?}"
            );
        }
    }

    #[test]
    fn coin_order_does_not_matter() {
        assert_eq!(calculate_line([1, 1, 0]), calculate_line([0, 1, 1]));
        assert_eq!(calculate_line([1, 0, 0]), calculate_line([0, 0, 1]));
    }

    #[test]
    fn trigrams_are_distinct_for_all_triples() {
        let names: HashSet<String> = all_triples()
            .into_iter()
            .map(|t| get_trigram(t).name)
            .collect();
        assert_eq!(names.len(), 8);
        assert!(!names.contains("未知"));
    }

    #[test]
    fn trigram_lookup_matches_canonical_patterns() {
        assert_eq!(get_trigram([1, 1, 1]).name, "乾");
        assert_eq!(get_trigram([0, 0, 0]).name, "坤");
        assert_eq!(get_trigram([1, 0, 0]).name, "震");
        assert_eq!(get_trigram([0, 1, 0]).name, "坎");
        assert_eq!(get_trigram([0, 0, 1]).name, "艮");
        assert_eq!(get_trigram([0, 1, 1]).name, "巽");
        assert_eq!(get_trigram([1, 0, 1]).name, "离");
        assert_eq!(get_trigram([1, 1, 0]).name, "兑");
    }

    #[test]
    fn hexagram_table_is_complete() {
        let mut numbers = HashSet::new();
        for upper in TrigramKind::ALL {
            for lower in TrigramKind::ALL {
                let info = get_hexagram(upper.name(), lower.name());
                assert!((1..=64).contains(&info.number), "{}", info.name);
                assert!(!info.judgment.is_empty());
                assert_ne!(info.judgment, PLACEHOLDER_JUDGMENT);
                numbers.insert(info.number);
            }
        }
        assert_eq!(numbers.len(), 64);
    }

    #[test]
    fn unknown_trigram_name_yields_placeholder() {
        let info = get_hexagram("未知", "坤");
        assert_eq!(info.name, "未知坤卦");
        assert_eq!(info.number, 0);
        assert_eq!(info.judgment, PLACEHOLDER_JUDGMENT);
    }

    #[test]
    fn earth_over_heaven_changes_to_heaven_over_earth() {
        let throws = [[1, 1, 1], [1, 1, 1], [1, 1, 1], [0, 0, 0], [0, 0, 0], [0, 0, 0]];
        let result = calculate_hexagram(&throws);

        let original = &result.original_hexagram;
        assert_eq!(original.lower_trigram.name, "乾");
        assert_eq!(original.upper_trigram.name, "坤");
        assert_eq!(original.number, 11);
        assert_eq!(original.name, "地天泰");
        assert_eq!(original.image(), "Earth over Heaven");
        assert_eq!(original.upper_trigram.nature, "地");
        assert_eq!(original.lower_trigram.attribute, "刚健");
        assert_eq!(original.lines, [1, 1, 1, 0, 0, 0]);

        assert!(result.has_changing_lines);
        assert!(result.lines.iter().all(|l| l.changing));

        let changed = result.changed_hexagram.as_ref().unwrap();
        assert_eq!(changed.upper_trigram.name, "乾");
        assert_eq!(changed.lower_trigram.name, "坤");
        assert_eq!(changed.number, 12);
        assert_eq!(changed.image(), "Heaven over Earth");
        assert_eq!(changed.lines, [0, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn stable_cast_has_no_changed_hexagram() {
        let result = calculate_hexagram(&[[1, 1, 0]; 6]);
        assert!(result.lines.iter().all(|l| l.kind == LineKind::YoungYang));
        assert!(!result.has_changing_lines);
        assert!(result.changed_hexagram.is_none());
        assert_eq!(result.original_hexagram.number, 1);
    }

    #[test]
    fn lines_are_positioned_bottom_to_top() {
        let result = calculate_hexagram(&[[1, 0, 0]; 6]);
        let positions: Vec<u8> = result.lines.iter().map(|l| l.position).collect();
        assert_eq!(positions, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(result.lines[0].position_name, "初爻");
        assert_eq!(result.lines[5].position_name, "上爻");
    }

    #[test]
    fn single_changing_line_flips_only_that_line() {
        // Young yin everywhere except an old yang on the third line.
        let mut throws = [[1, 0, 0]; 6];
        throws[2] = [1, 1, 1];
        let result = calculate_hexagram(&throws);

        assert!(result.has_changing_lines);
        assert_eq!(result.changing_lines().count(), 1);
        assert_eq!(result.original_hexagram.lines, [0, 0, 1, 0, 0, 0]);
        let changed = result.changed_hexagram.unwrap();
        assert_eq!(changed.lines, [0, 0, 0, 0, 0, 0]);
        assert_eq!(changed.number, 2);
    }

    #[test]
    fn changing_flag_tracks_zero_or_three_heads() {
        for triple in all_triples() {
            let mut throws = [[1, 1, 0]; 6];
            throws[4] = triple;
            let heads = triple.iter().filter(|&&c| c == 1).count();
            let result = calculate_hexagram(&throws);
            assert_eq!(result.has_changing_lines, heads == 0 || heads == 3);
            assert_eq!(result.changed_hexagram.is_some(), result.has_changing_lines);
        }
    }

    #[test]
    fn calculation_is_idempotent() {
        let throws = [[1, 0, 1], [0, 0, 0], [1, 1, 1], [0, 1, 0], [1, 1, 0], [0, 0, 1]];
        let first = calculate_hexagram(&throws);
        let second = calculate_hexagram(&throws);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
