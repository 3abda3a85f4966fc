use std::collections::HashSet;

use kotoba_core::language::WordIndex;

/// Known-word set plus the longest word length, derived from the dictionary
/// and the built-in list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabularyIndex {
    words: HashSet<String>,
    max_len: usize,
}

impl VocabularyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute from scratch over the union of both key sets
    pub fn rebuild<'a>(
        &mut self,
        dictionary_keys: impl IntoIterator<Item = &'a str>,
        builtin_keys: impl IntoIterator<Item = &'a str>,
    ) {
        self.words.clear();
        self.max_len = 0;

        for word in dictionary_keys.into_iter().chain(builtin_keys) {
            if self.words.contains(word) {
                continue;
            }
            self.max_len = self.max_len.max(word.chars().count());
            self.words.insert(word.to_string());
        }

        tracing::debug!(
            "Vocabulary index rebuilt: {} words, max length {}",
            self.words.len(),
            self.max_len
        );
    }

    pub fn contains(&self, candidate: &str) -> bool {
        self.words.contains(candidate)
    }

    pub fn max_length(&self) -> usize {
        self.max_len
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordIndex for VocabularyIndex {
    fn contains(&self, word: &str) -> bool {
        VocabularyIndex::contains(self, word)
    }

    fn max_length(&self) -> usize {
        self.max_len
    }
}

/// Longest known word of at least two characters starting at `at`.
///
/// Returns its length in characters. Lengths are tried from
/// `min(max_length, remaining)` down to 2, so the longer match always wins.
pub fn longest_match(index: &dyn WordIndex, chars: &[char], at: usize) -> Option<usize> {
    let remaining = chars.len().saturating_sub(at);
    let limit = index.max_length().min(remaining);

    (2..=limit).rev().find(|&len| {
        let candidate: String = chars[at..at + len].iter().collect();
        index.contains(&candidate)
    })
}
