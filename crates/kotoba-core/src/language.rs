/// Text segmentation interface for language implementations
pub trait Segmenter: Send + Sync {
    /// Language identifier (ISO 639-1 code: "ja", "zh", ...)
    fn language_code(&self) -> &str;

    /// Break text into candidate vocabulary tokens, in order of appearance
    fn segment(&self, text: &str, index: &dyn WordIndex) -> Vec<Token>;
}

/// Read-only view of the known-word set consulted during segmentation
pub trait WordIndex {
    fn contains(&self, word: &str) -> bool;

    /// Length in characters of the longest known word
    fn max_length(&self) -> usize;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub surface: String,
    /// Character offset inside the segmented text
    pub position: usize,
    pub origin: TokenOrigin,
}

/// How a token was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenOrigin {
    Dictionary,
    Fallback,
}

impl Token {
    pub fn new(surface: impl Into<String>, position: usize, origin: TokenOrigin) -> Self {
        Self {
            surface: surface.into(),
            position,
            origin,
        }
    }

    pub fn char_len(&self) -> usize {
        self.surface.chars().count()
    }
}
