/// Character classes the segmenter's fallback rules branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Kanji,
    Hiragana,
    Katakana,
    Digit,
    Other,
}

/// ー, extends the preceding katakana vowel
pub const PROLONGED_SOUND_MARK: char = 'ー';
/// 々, repeats the preceding kanji
pub const ITERATION_MARK: char = '々';
const CLOSING_MARK: char = '〆';

/// Measure words that follow a quantity and are not part of the noun after them
pub const COUNTERS: &[char] = &[
    '個', '人', '分', '時', '日', '週', '月', '年', '冊', '枚', '本', '匹', '回', '台', '杯', '度',
    '円',
];

/// Single-character particles; a fallback token containing one is rejected
pub const PARTICLES: &[char] = &[
    'は', 'が', 'を', 'に', 'へ', 'で', 'と', 'も', 'や', 'か', 'ね', 'よ', 'わ',
];

const KANJI_NUMERALS: &[char] = &[
    '〇', '一', '二', '三', '四', '五', '六', '七', '八', '九', '十', '百', '千', '万', '億',
];

/// Grammatical glue that is never worth a notebook entry
pub const HIRAGANA_STOPWORDS: &[&str] = &[
    "です", "でした", "でしょう", "ます", "ました", "ません", "ましょう", "ください",
    "という", "として", "について", "ところ", "これ", "それ", "あれ", "この", "その",
    "あの", "ここ", "そこ", "あそこ", "ような", "ように", "ので", "から", "けれども",
    "けど", "しかし", "そして", "だから", "でも", "まだ", "もう", "とても",
];

pub fn classify(c: char) -> CharClass {
    match c {
        '0'..='9' | '０'..='９' => CharClass::Digit,
        _ if KANJI_NUMERALS.contains(&c) => CharClass::Digit,
        '\u{3041}'..='\u{3096}' | '\u{309D}'..='\u{309E}' => CharClass::Hiragana,
        '\u{30A1}'..='\u{30FA}' | PROLONGED_SOUND_MARK | '\u{30FD}'..='\u{30FE}' => {
            CharClass::Katakana
        }
        '\u{3400}'..='\u{9FFF}' | ITERATION_MARK | CLOSING_MARK => CharClass::Kanji,
        _ => CharClass::Other,
    }
}

/// Whether `c` belongs to a Japanese script run (kana block, CJK ideographs, 々, 〆)
pub fn is_japanese(c: char) -> bool {
    matches!(
        c,
        '\u{3040}'..='\u{30FF}' | '\u{3400}'..='\u{9FFF}' | ITERATION_MARK | CLOSING_MARK
    )
}

pub fn contains_japanese(text: &str) -> bool {
    text.chars().any(is_japanese)
}

pub fn is_particle(c: char) -> bool {
    PARTICLES.contains(&c)
}

pub fn is_counter(c: char) -> bool {
    COUNTERS.contains(&c)
}

/// A maximal run of Japanese-script characters and its character offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRun {
    pub start: usize,
    pub chars: Vec<char>,
}

impl ScriptRun {
    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }
}

/// Split text into Japanese-script runs; everything else separates runs and is dropped
pub fn script_runs(text: &str) -> Vec<ScriptRun> {
    let mut runs = Vec::new();
    let mut current: Option<ScriptRun> = None;

    for (offset, c) in text.chars().enumerate() {
        if is_japanese(c) {
            current
                .get_or_insert_with(|| ScriptRun {
                    start: offset,
                    chars: Vec::new(),
                })
                .chars
                .push(c);
        } else if let Some(run) = current.take() {
            runs.push(run);
        }
    }

    runs.extend(current);
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_each_script() {
        assert_eq!(classify('あ'), CharClass::Hiragana);
        assert_eq!(classify('ゝ'), CharClass::Hiragana);
        assert_eq!(classify('カ'), CharClass::Katakana);
        assert_eq!(classify('ー'), CharClass::Katakana);
        assert_eq!(classify('語'), CharClass::Kanji);
        assert_eq!(classify('々'), CharClass::Kanji);
        assert_eq!(classify('三'), CharClass::Digit);
        assert_eq!(classify('7'), CharClass::Digit);
        assert_eq!(classify('７'), CharClass::Digit);
        assert_eq!(classify('a'), CharClass::Other);
        assert_eq!(classify('・'), CharClass::Other);
        assert_eq!(classify('。'), CharClass::Other);
    }

    #[test]
    fn runs_split_on_non_japanese() {
        let runs: Vec<String> = script_runs("こんにちは！元気ですか？ OK 日本語")
            .iter()
            .map(ScriptRun::as_string)
            .collect();
        assert_eq!(runs, vec!["こんにちは", "元気ですか", "日本語"]);
    }

    #[test]
    fn run_offsets_are_character_positions() {
        let runs = script_runs("ab日本 語");
        assert_eq!(runs[0].start, 2);
        assert_eq!(runs[1].start, 5);
    }

    #[test]
    fn particle_set_is_the_fixed_list() {
        assert_eq!(PARTICLES.iter().collect::<String>(), "はがをにへでともやかねよわ");
        assert!(is_particle('を'));
        assert!(!is_particle('の'));
    }

    #[test]
    fn latin_only_has_no_runs() {
        assert!(script_runs("Hello, world! 123").is_empty());
        assert!(!contains_japanese("word"));
        assert!(contains_japanese("x友達"));
    }
}
