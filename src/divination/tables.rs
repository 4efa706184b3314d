//! Static trigram and hexagram tables (King Wen sequence).

// ═══════════════════════════════════════════════════════════
// Trigrams
// ═══════════════════════════════════════════════════════════

/// The eight trigrams (八卦).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrigramKind {
    Qian,
    Kun,
    Zhen,
    Kan,
    Gen,
    Xun,
    Li,
    Dui,
}

impl TrigramKind {
    pub const ALL: [TrigramKind; 8] = [
        Self::Qian,
        Self::Kun,
        Self::Zhen,
        Self::Kan,
        Self::Gen,
        Self::Xun,
        Self::Li,
        Self::Dui,
    ];

    /// Resolve a trigram from its line values, bottom line first.
    ///
    /// Any non-zero value counts as a solid line.
    pub fn from_lines(lines: [u8; 3]) -> Self {
        match (lines[0] != 0, lines[1] != 0, lines[2] != 0) {
            (true, true, true) => Self::Qian,
            (false, false, false) => Self::Kun,
            (true, false, false) => Self::Zhen,
            (false, true, false) => Self::Kan,
            (false, false, true) => Self::Gen,
            (false, true, true) => Self::Xun,
            (true, false, true) => Self::Li,
            (true, true, false) => Self::Dui,
        }
    }

    /// Look a trigram up by its Chinese name or its pinyin (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.name() == name || t.pinyin().eq_ignore_ascii_case(name))
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Qian => "乾",
            Self::Kun => "坤",
            Self::Zhen => "震",
            Self::Kan => "坎",
            Self::Gen => "艮",
            Self::Xun => "巽",
            Self::Li => "离",
            Self::Dui => "兑",
        }
    }

    pub fn pinyin(self) -> &'static str {
        match self {
            Self::Qian => "Qian",
            Self::Kun => "Kun",
            Self::Zhen => "Zhen",
            Self::Kan => "Kan",
            Self::Gen => "Gen",
            Self::Xun => "Xun",
            Self::Li => "Li",
            Self::Dui => "Dui",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Qian => "☰",
            Self::Kun => "☷",
            Self::Zhen => "☳",
            Self::Kan => "☵",
            Self::Gen => "☶",
            Self::Xun => "☴",
            Self::Li => "☲",
            Self::Dui => "☱",
        }
    }

    /// Natural image of the trigram (天, 地, ...).
    pub fn nature(self) -> &'static str {
        match self {
            Self::Qian => "天",
            Self::Kun => "地",
            Self::Zhen => "雷",
            Self::Kan => "水",
            Self::Gen => "山",
            Self::Xun => "风",
            Self::Li => "火",
            Self::Dui => "泽",
        }
    }

    pub fn attribute(self) -> &'static str {
        match self {
            Self::Qian => "刚健",
            Self::Kun => "柔顺",
            Self::Zhen => "动",
            Self::Kan => "险",
            Self::Gen => "止",
            Self::Xun => "入",
            Self::Li => "丽",
            Self::Dui => "悦",
        }
    }

    /// English rendering of [`nature`](Self::nature), for English-language prompts.
    pub fn english_image(self) -> &'static str {
        match self {
            Self::Qian => "Heaven",
            Self::Kun => "Earth",
            Self::Zhen => "Thunder",
            Self::Kan => "Water",
            Self::Gen => "Mountain",
            Self::Xun => "Wind",
            Self::Li => "Fire",
            Self::Dui => "Lake",
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Hexagrams
// ═══════════════════════════════════════════════════════════

/// Static entry of the 64-hexagram table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexagramEntry {
    pub name: &'static str,
    pub number: u8,
    pub judgment: &'static str,
}

const fn entry(name: &'static str, number: u8, judgment: &'static str) -> HexagramEntry {
    HexagramEntry {
        name,
        number,
        judgment,
    }
}

/// Hexagram for an (upper, lower) trigram pair.
pub fn hexagram_entry(upper: TrigramKind, lower: TrigramKind) -> HexagramEntry {
    use TrigramKind::*;

    match (upper, lower) {
        (Qian, Qian) => entry("乾为天", 1, "元亨利贞"),
        (Qian, Kun) => entry("天地否", 12, "否之匪人，不利君子贞，大往小来"),
        (Qian, Zhen) => entry("天雷无妄", 25, "元亨利贞。其匪正有眚，不利有攸往"),
        (Qian, Kan) => entry("天水讼", 6, "有孚窒惕，中吉，终凶"),
        (Qian, Gen) => entry("天山遁", 33, "亨，小利贞"),
        (Qian, Xun) => entry("天风姤", 44, "女壮，勿用取女"),
        (Qian, Li) => entry("天火同人", 13, "同人于野，亨，利涉大川"),
        (Qian, Dui) => entry("天泽履", 10, "履虎尾，不咥人，亨"),

        (Kun, Qian) => entry("地天泰", 11, "小往大来，吉亨"),
        (Kun, Kun) => entry("坤为地", 2, "元亨，利牝马之贞"),
        (Kun, Zhen) => entry("地雷复", 24, "亨。出入无疾，朋来无咎"),
        (Kun, Kan) => entry("地水师", 7, "贞，丈人吉，无咎"),
        (Kun, Gen) => entry("地山谦", 15, "亨，君子有终"),
        (Kun, Xun) => entry("地风升", 46, "元亨，用见大人，勿恤，南征吉"),
        (Kun, Li) => entry("地火明夷", 36, "利艰贞"),
        (Kun, Dui) => entry("地泽临", 19, "元亨利贞，至于八月有凶"),

        (Zhen, Qian) => entry("雷天大壮", 34, "利贞"),
        (Zhen, Kun) => entry("雷地豫", 16, "利建侯行师"),
        (Zhen, Zhen) => entry("震为雷", 51, "亨。震来虩虩，笑言哑哑"),
        (Zhen, Kan) => entry("雷水解", 40, "利西南。无所往，其来复吉"),
        (Zhen, Gen) => entry("雷山小过", 62, "亨，利贞，可小事，不可大事"),
        (Zhen, Xun) => entry("雷风恒", 32, "亨，无咎，利贞，利有攸往"),
        (Zhen, Li) => entry("雷火丰", 55, "亨，王假之，勿忧，宜日中"),
        (Zhen, Dui) => entry("雷泽归妹", 54, "征凶，无攸利"),

        (Kan, Qian) => entry("水天需", 5, "有孚，光亨，贞吉，利涉大川"),
        (Kan, Kun) => entry("水地比", 8, "吉。原筮元永贞，无咎"),
        (Kan, Zhen) => entry("水雷屯", 3, "元亨利贞，勿用有攸往，利建侯"),
        (Kan, Kan) => entry("坎为水", 29, "习坎，有孚，维心亨，行有尚"),
        (Kan, Gen) => entry("水山蹇", 39, "利西南，不利东北，利见大人，贞吉"),
        (Kan, Xun) => entry("水风井", 48, "改邑不改井，无丧无得"),
        (Kan, Li) => entry("水火既济", 63, "亨小，利贞，初吉终乱"),
        (Kan, Dui) => entry("水泽节", 60, "亨。苦节不可贞"),

        (Gen, Qian) => entry("山天大畜", 26, "利贞，不家食吉，利涉大川"),
        (Gen, Kun) => entry("山地剥", 23, "不利有攸往"),
        (Gen, Zhen) => entry("山雷颐", 27, "贞吉。观颐，自求口实"),
        (Gen, Kan) => entry("山水蒙", 4, "亨。匪我求童蒙，童蒙求我"),
        (Gen, Gen) => entry("艮为山", 52, "艮其背，不获其身，行其庭，不见其人，无咎"),
        (Gen, Xun) => entry("山风蛊", 18, "元亨，利涉大川"),
        (Gen, Li) => entry("山火贲", 22, "亨，小利有攸往"),
        (Gen, Dui) => entry("山泽损", 41, "有孚，元吉，无咎，可贞，利有攸往"),

        (Xun, Qian) => entry("风天小畜", 9, "亨。密云不雨，自我西郊"),
        (Xun, Kun) => entry("风地观", 20, "盥而不荐，有孚颙若"),
        (Xun, Zhen) => entry("风雷益", 42, "利有攸往，利涉大川"),
        (Xun, Kan) => entry("风水涣", 59, "亨。王假有庙，利涉大川，利贞"),
        (Xun, Gen) => entry("风山渐", 53, "女归吉，利贞"),
        (Xun, Xun) => entry("巽为风", 57, "小亨，利有攸往，利见大人"),
        (Xun, Li) => entry("风火家人", 37, "利女贞"),
        (Xun, Dui) => entry("风泽中孚", 61, "豚鱼吉，利涉大川，利贞"),

        (Li, Qian) => entry("火天大有", 14, "元亨"),
        (Li, Kun) => entry("火地晋", 35, "康侯用锡马蕃庶，昼日三接"),
        (Li, Zhen) => entry("火雷噬嗑", 21, "亨，利用狱"),
        (Li, Kan) => entry("火水未济", 64, "亨，小狐汔济，濡其尾，无攸利"),
        (Li, Gen) => entry("火山旅", 56, "小亨，旅贞吉"),
        (Li, Xun) => entry("火风鼎", 50, "元吉，亨"),
        (Li, Li) => entry("离为火", 30, "利贞，亨。畜牝牛，吉"),
        (Li, Dui) => entry("火泽睽", 38, "小事吉"),

        (Dui, Qian) => entry("泽天夬", 43, "扬于王庭，孚号有厉"),
        (Dui, Kun) => entry("泽地萃", 45, "亨。王假有庙，利见大人"),
        (Dui, Zhen) => entry("泽雷随", 17, "元亨利贞，无咎"),
        (Dui, Kan) => entry("泽水困", 47, "亨，贞，大人吉，无咎"),
        (Dui, Gen) => entry("泽山咸", 31, "亨，利贞，取女吉"),
        (Dui, Xun) => entry("泽风大过", 28, "栋桡，利有攸往，亨"),
        (Dui, Li) => entry("泽火革", 49, "己日乃孚，元亨利贞，悔亡"),
        (Dui, Dui) => entry("兑为泽", 58, "亨，利贞"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn from_lines_resolves_every_trigram() {
        let cases = [
            ([1, 1, 1], TrigramKind::Qian),
            ([0, 0, 0], TrigramKind::Kun),
            ([1, 0, 0], TrigramKind::Zhen),
            ([0, 1, 0], TrigramKind::Kan),
            ([0, 0, 1], TrigramKind::Gen),
            ([0, 1, 1], TrigramKind::Xun),
            ([1, 0, 1], TrigramKind::Li),
            ([1, 1, 0], TrigramKind::Dui),
        ];
        for (lines, trigram) in cases {
            assert_eq!(TrigramKind::from_lines(lines), trigram);
        }
    }

    #[test]
    fn natures_and_attributes_are_chinese() {
        assert_eq!(TrigramKind::Qian.nature(), "天");
        assert_eq!(TrigramKind::Qian.attribute(), "刚健");
        assert_eq!(TrigramKind::Kun.nature(), "地");
        assert_eq!(TrigramKind::Kun.attribute(), "柔顺");
        assert_eq!(TrigramKind::Dui.nature(), "泽");
        assert_eq!(TrigramKind::Dui.english_image(), "Lake");
    }

    #[test]
    fn from_name_accepts_chinese_and_pinyin() {
        assert_eq!(TrigramKind::from_name("坎"), Some(TrigramKind::Kan));
        assert_eq!(TrigramKind::from_name("xun"), Some(TrigramKind::Xun));
        assert_eq!(TrigramKind::from_name(" QIAN "), Some(TrigramKind::Qian));
        assert_eq!(TrigramKind::from_name("未知"), None);
    }

    #[test]
    fn hexagram_names_are_unique() {
        let names: HashSet<&str> = TrigramKind::ALL
            .iter()
            .flat_map(|u| TrigramKind::ALL.iter().map(move |l| hexagram_entry(*u, *l).name))
            .collect();
        assert_eq!(names.len(), 64);
    }

    #[test]
    fn doubled_trigrams_follow_classic_numbering() {
        let doubled: Vec<u8> = TrigramKind::ALL
            .iter()
            .map(|t| hexagram_entry(*t, *t).number)
            .collect();
        assert_eq!(doubled, vec![1, 2, 51, 29, 52, 57, 30, 58]);
    }
}
