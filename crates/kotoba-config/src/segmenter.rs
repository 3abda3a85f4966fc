use serde::{Deserialize, Serialize};

/// Heuristic applied to text the dictionary does not cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Length-based: short tails whole, longer spans in 2-character chunks
    Simple,
    /// Character-class aware: katakana loanwords, kanji stems with okurigana
    #[default]
    Refined,
}

impl FallbackPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "simple" => Some(FallbackPolicy::Simple),
            "refined" => Some(FallbackPolicy::Refined),
            _ => None,
        }
    }
}

fn default_normalize() -> bool {
    true
}

fn default_hiragana_min_len() -> usize {
    4
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SegmenterConfig {
    pub fallback: FallbackPolicy,
    /// NFKC-normalize input before segmenting
    #[serde(default = "default_normalize")]
    pub normalize: bool,
    /// Emit long, non-stopword hiragana blocks instead of discarding them
    pub emit_hiragana: bool,
    #[serde(default = "default_hiragana_min_len")]
    pub hiragana_min_len: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            fallback: FallbackPolicy::default(),
            normalize: default_normalize(),
            emit_hiragana: false,
            hiragana_min_len: default_hiragana_min_len(),
        }
    }
}
