//! Dictionary-biased Japanese tokenizer.
//!
//! Each Japanese-script run is scanned left to right. At every position the
//! longest known word (two characters or more) wins; when nothing matches,
//! a fallback heuristic decides whether to emit an unknown-word token and how
//! far to advance. Matching is greedy and never backtracks.

use std::collections::HashSet;

use kotoba_config::FallbackPolicy;
use kotoba_config::segmenter::SegmenterConfig;
use kotoba_core::language::{Segmenter, Token, TokenOrigin, WordIndex};

use crate::index::longest_match;
use crate::script::{self, CharClass, ITERATION_MARK, ScriptRun};

/// Longest hiragana tail absorbed after a single kanji
const MAX_OKURIGANA: usize = 3;
/// Shortest katakana block accepted as a loanword
const MIN_KATAKANA_LEN: usize = 3;
/// Shortest single-kanji + okurigana token
const MIN_INFLECTED_LEN: usize = 3;
/// Runs this short are emitted whole by the simple fallback
const SIMPLE_TAIL_LEN: usize = 4;

/// Opt-in emission of hiragana-only blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HiraganaPolicy {
    pub emit: bool,
    pub min_len: usize,
}

impl Default for HiraganaPolicy {
    fn default() -> Self {
        Self {
            emit: false,
            min_len: 4,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JapaneseSegmenter {
    fallback: FallbackPolicy,
    hiragana: HiraganaPolicy,
}

impl JapaneseSegmenter {
    pub fn new(fallback: FallbackPolicy) -> Self {
        Self {
            fallback,
            hiragana: HiraganaPolicy::default(),
        }
    }

    pub fn from_config(config: &SegmenterConfig) -> Self {
        Self {
            fallback: config.fallback,
            hiragana: HiraganaPolicy {
                emit: config.emit_hiragana,
                min_len: config.hiragana_min_len,
            },
        }
    }

    pub fn with_hiragana(mut self, hiragana: HiraganaPolicy) -> Self {
        self.hiragana = hiragana;
        self
    }

    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }

    /// Segment and deduplicate: first occurrence wins, single characters are dropped
    pub fn segment_words(&self, text: &str, index: &dyn WordIndex) -> Vec<String> {
        let mut seen = HashSet::new();
        self.segment(text, index)
            .into_iter()
            .filter(|token| token.char_len() > 1)
            .map(|token| token.surface)
            .filter(|word| seen.insert(word.clone()))
            .collect()
    }

    fn scan_run(&self, run: &ScriptRun, index: &dyn WordIndex, out: &mut Vec<Token>) {
        let chars = &run.chars;
        let mut i = 0;

        while i < chars.len() {
            if let Some(len) = longest_match(index, chars, i) {
                out.push(token(chars, i, i + len, run.start, TokenOrigin::Dictionary));
                i += len;
                continue;
            }

            let mut emit = |from: usize, to: usize| {
                out.push(token(chars, from, to, run.start, TokenOrigin::Fallback));
            };
            let next = match self.fallback {
                FallbackPolicy::Simple => simple_fallback(chars, i, &mut emit),
                FallbackPolicy::Refined => self.refined_fallback(chars, i, index, &mut emit),
            };

            // Every branch consumes at least one character
            i = next.max(i + 1);
        }
    }

    fn refined_fallback(
        &self,
        chars: &[char],
        i: usize,
        index: &dyn WordIndex,
        emit: &mut dyn FnMut(usize, usize),
    ) -> usize {
        match script::classify(chars[i]) {
            CharClass::Katakana => {
                let end = class_end(chars, i, CharClass::Katakana);
                if end - i >= MIN_KATAKANA_LEN {
                    emit(i, end);
                }
                end
            }
            CharClass::Kanji => kanji_fallback(chars, i, index, emit),
            CharClass::Hiragana => {
                let end = hiragana_end(chars, i, index, usize::MAX);
                if self.hiragana.emit && end - i >= self.hiragana.min_len {
                    let block: String = chars[i..end].iter().collect();
                    if !script::HIRAGANA_STOPWORDS.contains(&block.as_str()) {
                        emit(i, end);
                    }
                }
                end
            }
            CharClass::Digit | CharClass::Other => i + 1,
        }
    }
}

impl Segmenter for JapaneseSegmenter {
    fn language_code(&self) -> &str {
        "ja"
    }

    fn segment(&self, text: &str, index: &dyn WordIndex) -> Vec<Token> {
        let mut tokens = Vec::new();
        for run in script::script_runs(text) {
            self.scan_run(&run, index, &mut tokens);
        }
        tokens
    }
}

/// Short tails become one token; longer spans are cut into 2-character chunks
fn simple_fallback(chars: &[char], i: usize, emit: &mut dyn FnMut(usize, usize)) -> usize {
    let remaining = chars.len() - i;
    if remaining <= SIMPLE_TAIL_LEN {
        if remaining >= 2 {
            emit(i, chars.len());
        }
        chars.len()
    } else {
        emit(i, i + 2);
        i + 2
    }
}

/// Kanji block, minus a leading counter; a lone kanji may take up to three
/// hiragana of okurigana
fn kanji_fallback(
    chars: &[char],
    i: usize,
    index: &dyn WordIndex,
    emit: &mut dyn FnMut(usize, usize),
) -> usize {
    let block_end = class_end(chars, i, CharClass::Kanji);

    let mut stem_start = i;
    if block_end - i > 1 && script::is_counter(chars[i]) && chars[i + 1] != ITERATION_MARK {
        stem_start += 1;
    }

    let stem_len = block_end - stem_start;
    if stem_len >= 2 {
        emit(stem_start, block_end);
        return block_end;
    }

    // A lone kanji needs okurigana to count as a word
    let tail_end = hiragana_end(chars, block_end, index, MAX_OKURIGANA);
    let combined = &chars[stem_start..tail_end];

    let clean = combined
        .iter()
        .all(|&c| !script::is_particle(c) && script::classify(c) != CharClass::Digit);
    if combined.len() >= MIN_INFLECTED_LEN && clean {
        emit(stem_start, tail_end);
    }

    tail_end
}

fn class_end(chars: &[char], from: usize, class: CharClass) -> usize {
    let mut end = from;
    while end < chars.len() && script::classify(chars[end]) == class {
        end += 1;
    }
    end
}

/// End of the hiragana block at `from`, at most `limit` long. The block stops
/// where a known word begins so that word is still matched.
fn hiragana_end(chars: &[char], from: usize, index: &dyn WordIndex, limit: usize) -> usize {
    let mut end = from;
    while end < chars.len()
        && end - from < limit
        && script::classify(chars[end]) == CharClass::Hiragana
        && longest_match(index, chars, end).is_none()
    {
        end += 1;
    }
    end
}

fn token(chars: &[char], from: usize, to: usize, base: usize, origin: TokenOrigin) -> Token {
    Token::new(chars[from..to].iter().collect::<String>(), base + from, origin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::VocabularyIndex;

    fn index_of(words: &[&str]) -> VocabularyIndex {
        let mut index = VocabularyIndex::new();
        index.rebuild(words.iter().copied(), std::iter::empty());
        index
    }

    fn refined(text: &str, words: &[&str]) -> Vec<String> {
        JapaneseSegmenter::new(FallbackPolicy::Refined).segment_words(text, &index_of(words))
    }

    fn simple(text: &str, words: &[&str]) -> Vec<String> {
        JapaneseSegmenter::new(FallbackPolicy::Simple).segment_words(text, &index_of(words))
    }

    #[test]
    fn longer_dictionary_match_wins() {
        let words = ["日本", "日本語", "勉強"];
        assert_eq!(refined("日本語を勉強する", &words), vec!["日本語", "勉強"]);

        let tokens = simple("日本語を勉強する", &words);
        assert_eq!(tokens[0], "日本語");
        assert!(!tokens.contains(&"日本".to_string()));
    }

    #[test]
    fn non_japanese_text_yields_nothing() {
        assert!(refined("Hello, world! 123", &["日本"]).is_empty());
        assert!(simple("Hello, world! 123", &["日本"]).is_empty());
        assert!(refined("", &[]).is_empty());
    }

    #[test]
    fn katakana_needs_three_characters() {
        assert_eq!(refined("コーヒー", &[]), vec!["コーヒー"]);
        assert!(refined("アイ", &[]).is_empty());
        assert_eq!(refined("アイ", &["アイ"]), vec!["アイ"]);
    }

    #[test]
    fn greeting_and_kanji_compound() {
        let words = refined("こんにちは！元気ですか？", &["こんにちは"]);
        assert_eq!(words, vec!["こんにちは", "元気"]);
    }

    #[test]
    fn leading_counter_is_stripped() {
        assert_eq!(refined("三人家族です", &[]), vec!["家族"]);
        assert_eq!(refined("五冊本棚", &[]), vec!["本棚"]);
        // A counter followed by the iteration mark is a word of its own
        assert_eq!(refined("人々", &[]), vec!["人々"]);
    }

    #[test]
    fn single_kanji_takes_okurigana() {
        assert_eq!(refined("食べた", &[]), vec!["食べた"]);
        assert_eq!(refined("書きます", &[]), vec!["書きます"]);
        // Too short without a longer stem
        assert!(refined("見た", &[]).is_empty());
        // Particles are never folded into a word
        assert!(refined("私は", &[]).is_empty());
    }

    #[test]
    fn okurigana_absorption_stops_at_known_word() {
        assert_eq!(
            refined("私こんにちは", &["こんにちは"]),
            vec!["こんにちは"]
        );
    }

    #[test]
    fn hiragana_blocks_are_discarded_by_default() {
        assert!(refined("ありがたい", &[]).is_empty());
        assert_eq!(
            refined("ですこんにちは", &["こんにちは"]),
            vec!["こんにちは"]
        );
    }

    #[test]
    fn opt_in_hiragana_skips_stopwords() {
        let segmenter = JapaneseSegmenter::new(FallbackPolicy::Refined).with_hiragana(
            HiraganaPolicy {
                emit: true,
                min_len: 4,
            },
        );
        let index = index_of(&[]);
        assert_eq!(segmenter.segment_words("ありがたい", &index), vec!["ありがたい"]);
        assert!(segmenter.segment_words("ください", &index).is_empty());
        assert!(segmenter.segment_words("あれ", &index).is_empty());
    }

    #[test]
    fn simple_fallback_chunks_long_runs() {
        // Seven unknown characters: two chunks of two, then a tail of three
        assert_eq!(simple("あいうえおかき", &[]), vec!["あい", "うえ", "おかき"]);
        // A lone trailing character is dropped
        assert_eq!(simple("日本 の", &[]), vec!["日本"]);
        assert_eq!(simple("あいうえお", &[]), vec!["あい", "うえお"]);
    }

    #[test]
    fn repeated_tokens_are_deduplicated_in_order() {
        let words = refined("コーヒー、紅茶、コーヒー", &[]);
        assert_eq!(words, vec!["コーヒー", "紅茶"]);
    }

    #[test]
    fn token_positions_point_into_the_text() {
        let segmenter = JapaneseSegmenter::default();
        let tokens = segmenter.segment("I like コーヒー", &index_of(&[]));
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].position, 7);
        assert_eq!(tokens[0].origin, TokenOrigin::Fallback);
    }
}
