use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use kotoba_config::segmenter::SegmenterConfig;
use kotoba_core::preprocess::{DefaultPreprocessor, Preprocessor, RawPreprocessor};
use kotoba_types::NotebookEntry;

use crate::dictionary::VocabDictionary;
use crate::segmenter::JapaneseSegmenter;

/// Placeholder for a reading or meaning nobody has supplied yet
pub const PENDING: &str = "(pending)";

/// Milliseconds since the Unix epoch
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// A word seen in text but found in neither the dictionary nor the built-ins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownWord {
    pub word: String,
    pub source: String,
    pub first_seen: u64,
}

/// Turns raw text into annotated notebook entries
pub struct VocabularyExtractor {
    segmenter: JapaneseSegmenter,
    normalize: bool,
    unknown: HashMap<String, UnknownWord>,
}

impl VocabularyExtractor {
    pub fn new(segmenter: JapaneseSegmenter) -> Self {
        Self {
            segmenter,
            normalize: true,
            unknown: HashMap::new(),
        }
    }

    pub fn from_config(config: &SegmenterConfig) -> Self {
        Self {
            normalize: config.normalize,
            ..Self::new(JapaneseSegmenter::from_config(config))
        }
    }

    pub fn segmenter(&self) -> &JapaneseSegmenter {
        &self.segmenter
    }

    /// Normalized, deduplicated words of `text` in first-occurrence order
    pub fn segment(&self, dictionary: &VocabDictionary, text: Option<&str>) -> Vec<String> {
        let text = if self.normalize {
            DefaultPreprocessor.process(text)
        } else {
            RawPreprocessor.process(text)
        };
        if text.is_empty() {
            return Vec::new();
        }

        self.segmenter.segment_words(&text, dictionary.index())
    }

    /// Segment `text` and annotate each word.
    ///
    /// Known words take their reading and meaning from the dictionary (then the
    /// built-ins); an empty meaning becomes [`PENDING`]. Unknown words get
    /// [`PENDING`] for both and are remembered in the unknown-word table.
    pub fn extract(
        &mut self,
        dictionary: &VocabDictionary,
        text: Option<&str>,
        source: &str,
        timestamp: u64,
    ) -> Vec<NotebookEntry> {
        let words = self.segment(dictionary, text);

        words
            .into_iter()
            .map(|word| {
                let (romaji, meaning) = match dictionary.lookup(&word) {
                    Some(entry) => {
                        let meaning = if entry.meaning.is_empty() {
                            PENDING.to_string()
                        } else {
                            entry.meaning.clone()
                        };
                        (entry.romaji.clone(), meaning)
                    }
                    None => {
                        self.unknown
                            .entry(word.clone())
                            .or_insert_with(|| UnknownWord {
                                word: word.clone(),
                                source: source.to_string(),
                                first_seen: timestamp,
                            });
                        (PENDING.to_string(), PENDING.to_string())
                    }
                };

                NotebookEntry {
                    word,
                    romaji,
                    meaning,
                    source: source.to_string(),
                    timestamp,
                }
            })
            .collect()
    }

    /// Unknown words, oldest sighting first
    pub fn unknown_words(&self) -> Vec<&UnknownWord> {
        let mut words: Vec<&UnknownWord> = self.unknown.values().collect();
        words.sort_by(|a, b| a.first_seen.cmp(&b.first_seen).then(a.word.cmp(&b.word)));
        words
    }

    /// Forget words that have since been imported
    pub fn prune_known(&mut self, dictionary: &VocabDictionary) {
        self.unknown.retain(|word, _| dictionary.lookup(word).is_none());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use kotoba_config::FallbackPolicy;
    use kotoba_core::MemoryStore;

    use super::*;

    fn dictionary() -> VocabDictionary {
        VocabDictionary::open(Arc::new(MemoryStore::new()))
    }

    fn extractor() -> VocabularyExtractor {
        VocabularyExtractor::new(JapaneseSegmenter::new(FallbackPolicy::Refined))
    }

    #[test]
    fn greeting_is_annotated_and_unknown_word_pending() {
        let dict = dictionary();
        let mut extractor = extractor();

        let entries = extractor.extract(&dict, Some("こんにちは！元気ですか？"), "agent reply", 1000);
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].word, "こんにちは");
        assert_eq!(entries[0].romaji, "konnichiwa");
        assert_eq!(entries[0].meaning, "你好");

        assert_eq!(entries[1].word, "元気");
        assert_eq!(entries[1].romaji, PENDING);
        assert_eq!(entries[1].meaning, PENDING);
        assert!(entries.iter().all(|e| e.timestamp == 1000 && e.source == "agent reply"));

        let unknown = extractor.unknown_words();
        assert_eq!(unknown.len(), 1);
        assert_eq!(unknown[0].word, "元気");
    }

    #[test]
    fn unknown_table_keeps_first_sighting() {
        let dict = dictionary();
        let mut extractor = extractor();

        extractor.extract(&dict, Some("元気"), "agent reply", 1);
        extractor.extract(&dict, Some("元気"), "manual", 2);

        let unknown = extractor.unknown_words();
        assert_eq!(unknown.len(), 1);
        assert_eq!(unknown[0].first_seen, 1);
        assert_eq!(unknown[0].source, "agent reply");
    }

    #[test]
    fn empty_meaning_becomes_pending() {
        let mut dict = dictionary();
        dict.bulk_import("元気,genki").unwrap();

        let entries = extractor().extract(&dict, Some("元気です"), "manual", 5);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].romaji, "genki");
        assert_eq!(entries[0].meaning, PENDING);
    }

    #[test]
    fn missing_or_foreign_text_extracts_nothing() {
        let dict = dictionary();
        let mut extractor = extractor();
        assert!(extractor.extract(&dict, None, "manual", 0).is_empty());
        assert!(extractor.extract(&dict, Some("   "), "manual", 0).is_empty());
        assert!(extractor.extract(&dict, Some("Hello!"), "manual", 0).is_empty());
        assert!(extractor.unknown_words().is_empty());
    }

    #[test]
    fn half_width_katakana_is_normalized() {
        let dict = dictionary();
        let words = extractor().segment(&dict, Some("ｺｰﾋｰ"));
        assert_eq!(words, vec!["コーヒー"]);

        let raw = VocabularyExtractor::from_config(&SegmenterConfig {
            normalize: false,
            ..SegmenterConfig::default()
        });
        assert!(raw.segment(&dict, Some("ｺｰﾋｰ")).is_empty());
    }

    #[test]
    fn imported_words_leave_the_unknown_table() {
        let mut dict = dictionary();
        let mut extractor = extractor();
        extractor.extract(&dict, Some("元気"), "manual", 1);

        dict.bulk_import("元気,genki,healthy").unwrap();
        extractor.prune_known(&dict);
        assert!(extractor.unknown_words().is_empty());
    }
}
