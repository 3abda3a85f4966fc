use std::collections::BTreeMap;
use std::sync::Arc;

use kotoba_core::KeyValueStore;
use kotoba_core::preprocess::{DefaultPreprocessor, Preprocessor};
use kotoba_types::ImportSummary;
use serde::{Deserialize, Serialize};

use crate::builtin::BuiltinWords;
use crate::import::{self, DictionaryRow, ImportError};
use crate::index::VocabularyIndex;
use crate::script;

/// Storage key of the persisted word → metadata object
pub const DICTIONARY_KEY: &str = "vocab_dictionary";

/// Metadata kept for one dictionary word
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    #[serde(default)]
    pub romaji: String,
    #[serde(default)]
    pub meaning: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub tags: String,
}

impl VocabEntry {
    /// Field-wise merge: a non-empty incoming value replaces, an empty one never does
    pub fn merge(&mut self, incoming: VocabEntry) {
        fn take(slot: &mut String, value: String) {
            if !value.is_empty() {
                *slot = value;
            }
        }

        take(&mut self.romaji, incoming.romaji);
        take(&mut self.meaning, incoming.meaning);
        take(&mut self.level, incoming.level);
        take(&mut self.tags, incoming.tags);
    }
}

/// User vocabulary dictionary.
///
/// The built-in word list is a separate source: it is unioned into the index
/// and consulted after the dictionary on lookup, but never copied into it
/// except for the one-time seed on first load.
pub struct VocabDictionary {
    entries: BTreeMap<String, VocabEntry>,
    builtin: BuiltinWords,
    index: VocabularyIndex,
    store: Arc<dyn KeyValueStore>,
    /// NFKC imported words so they match normalized text
    normalize: bool,
}

impl VocabDictionary {
    /// Empty dictionary over `store` with the default built-in words
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_builtin(store, BuiltinWords::with_defaults())
    }

    pub fn with_builtin(store: Arc<dyn KeyValueStore>, builtin: BuiltinWords) -> Self {
        let mut dictionary = Self {
            entries: BTreeMap::new(),
            builtin,
            index: VocabularyIndex::new(),
            store,
            normalize: true,
        };
        dictionary.rebuild_index();
        dictionary
    }

    /// Create and immediately `load()`
    pub fn open(store: Arc<dyn KeyValueStore>) -> Self {
        let mut dictionary = Self::new(store);
        dictionary.load();
        dictionary
    }

    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Read the persisted dictionary, seeding it from the built-in list on first run.
    ///
    /// Unreadable or corrupt data leaves an empty dictionary for the session.
    pub fn load(&mut self) {
        match self.store.get(DICTIONARY_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<BTreeMap<String, VocabEntry>>(&raw) {
                Ok(entries) => {
                    tracing::info!("Loaded {} dictionary entries", entries.len());
                    self.entries = entries;
                }
                Err(e) => {
                    tracing::warn!("Stored dictionary is corrupt, starting empty: {}", e);
                    self.entries.clear();
                }
            },
            Ok(None) => {
                tracing::info!(
                    "No stored dictionary, seeding {} built-in words",
                    self.builtin.len()
                );
                self.entries = self
                    .builtin
                    .entries()
                    .map(|(word, entry)| (word.clone(), entry.clone()))
                    .collect();
                self.save();
            }
            Err(e) => {
                tracing::warn!("Failed to read dictionary, starting empty: {}", e);
                self.entries.clear();
            }
        }

        self.rebuild_index();
    }

    /// Persist the current entries. Failures are logged; memory stays authoritative.
    pub fn save(&self) {
        let raw = match serde_json::to_string(&self.entries) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to serialize dictionary: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(DICTIONARY_KEY, &raw) {
            tracing::warn!("Failed to save dictionary: {}", e);
        }
    }

    /// Import JSON, NDJSON or CSV text, merging into existing entries.
    ///
    /// Rows without a Japanese word are skipped. On a parse failure nothing
    /// changes and the error carries the current word count.
    pub fn bulk_import(&mut self, text: &str) -> Result<ImportSummary, ImportError> {
        let (format, rows) = import::parse_rows(text).map_err(|e| match e {
            ImportError::Parse {
                format, message, ..
            } => ImportError::Parse {
                format,
                message,
                total: self.entries.len(),
            },
            other => other,
        })?;

        let mut summary = ImportSummary::default();
        let mut skipped = 0;

        for row in rows {
            let word = if self.normalize {
                DefaultPreprocessor.process(Some(&row.word))
            } else {
                row.word
            };
            if word.is_empty() || !script::contains_japanese(&word) {
                skipped += 1;
                continue;
            }

            let incoming = VocabEntry {
                romaji: row.romaji,
                meaning: row.meaning,
                level: row.level,
                tags: row.tags,
            };

            match self.entries.get_mut(&word) {
                Some(existing) => {
                    existing.merge(incoming);
                    summary.updated += 1;
                }
                None => {
                    self.entries.insert(word, incoming);
                    summary.added += 1;
                }
            }
        }

        self.rebuild_index();
        self.save();

        summary.total = self.entries.len();
        tracing::info!(
            "Imported {} rows: {} added, {} updated, {} skipped, {} total",
            format.as_str(),
            summary.added,
            summary.updated,
            skipped,
            summary.total
        );
        Ok(summary)
    }

    /// Every entry flattened, ordered by word
    pub fn export_rows(&self) -> Vec<DictionaryRow> {
        self.entries
            .iter()
            .map(|(word, entry)| DictionaryRow {
                word: word.clone(),
                romaji: entry.romaji.clone(),
                meaning: entry.meaning.clone(),
                level: entry.level.clone(),
                tags: entry.tags.clone(),
            })
            .collect()
    }

    pub fn export_csv(&self) -> Result<String, ImportError> {
        import::dictionary_csv(&self.export_rows())
    }

    /// Dictionary first, built-in list second
    pub fn lookup(&self, word: &str) -> Option<&VocabEntry> {
        self.entries.get(word).or_else(|| self.builtin.get(word))
    }

    pub fn index(&self) -> &VocabularyIndex {
        &self.index
    }

    pub fn entries(&self) -> &BTreeMap<String, VocabEntry> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn rebuild_index(&mut self) {
        self.index.rebuild(
            self.entries.keys().map(String::as_str),
            self.builtin.words(),
        );
    }
}
