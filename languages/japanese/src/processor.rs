use std::sync::Arc;

use kotoba_config::Config;
use kotoba_core::KeyValueStore;
use kotoba_core::preprocess::coerce_text;
use kotoba_types::{ImportSummary, NotebookEntry, TextSource};

use crate::dictionary::VocabDictionary;
use crate::extractor::{UnknownWord, VocabularyExtractor};
use crate::import::ImportError;
use crate::loader::VocabSource;
use crate::notebook::{Notebook, NotebookView};

/// Storage key marking that the one-time auto-import has completed
pub const AUTO_IMPORT_KEY: &str = "vocab_auto_import_done";

/// Japanese vocabulary processor: dictionary, extractor and notebook behind one API
pub struct JapaneseProcessor {
    dictionary: VocabDictionary,
    extractor: VocabularyExtractor,
    notebook: Notebook,
    store: Arc<dyn KeyValueStore>,
    extract_from_user: bool,
    display_cap: usize,
}

impl JapaneseProcessor {
    /// Load the dictionary and notebook from `store`
    pub fn open(store: Arc<dyn KeyValueStore>, config: &Config) -> Self {
        let mut dictionary =
            VocabDictionary::new(store.clone()).with_normalize(config.segmenter.normalize);
        dictionary.load();
        let notebook = Notebook::open(store.clone());

        tracing::info!(
            "Japanese processor ready: {} dictionary words, {} notebook entries, {:?} fallback",
            dictionary.len(),
            notebook.len(),
            config.segmenter.fallback
        );

        Self {
            dictionary,
            extractor: VocabularyExtractor::from_config(&config.segmenter),
            notebook,
            store,
            extract_from_user: config.notebook.extract_from_user,
            display_cap: config.notebook.display_cap,
        }
    }

    /// Extract words from `text` and record the new ones in the notebook.
    ///
    /// User input is skipped unless extraction from user input is enabled.
    pub fn handle_text(&mut self, text: &str, source: TextSource, now: u64) -> Vec<NotebookEntry> {
        if source == TextSource::UserInput && !self.extract_from_user {
            tracing::debug!("Ignoring user input ({} chars)", text.chars().count());
            return Vec::new();
        }

        let candidates = self
            .extractor
            .extract(&self.dictionary, Some(text), source.as_str(), now);
        let recorded = self.notebook.record(candidates);

        tracing::debug!("{} new words from {}", recorded.len(), source.as_str());
        recorded
    }

    /// Like `handle_text` for an arbitrary JSON payload; only strings carry text
    pub fn handle_value(
        &mut self,
        value: &serde_json::Value,
        source: TextSource,
        now: u64,
    ) -> Vec<NotebookEntry> {
        match coerce_text(value) {
            Some(text) => self.handle_text(text, source, now),
            None => Vec::new(),
        }
    }

    /// Annotated words of `text` without touching the notebook
    pub fn preview(&mut self, text: &str, source: TextSource, now: u64) -> Vec<NotebookEntry> {
        self.extractor
            .extract(&self.dictionary, Some(text), source.as_str(), now)
    }

    pub fn import(&mut self, text: &str) -> Result<ImportSummary, ImportError> {
        match self.dictionary.bulk_import(text) {
            Ok(summary) => {
                self.extractor.prune_known(&self.dictionary);
                tracing::info!(
                    "Import finished: {} added, {} updated, {} total",
                    summary.added,
                    summary.updated,
                    summary.total
                );
                Ok(summary)
            }
            Err(e) => {
                tracing::warn!("Import failed: {}", e);
                Err(e)
            }
        }
    }

    /// Import from `source` once per store. The flag is only set after a
    /// successful import, so a failed attempt is retried next time.
    ///
    /// Returns whether an import happened.
    pub async fn auto_import_once(&mut self, source: &dyn VocabSource) -> bool {
        match self.store.get(AUTO_IMPORT_KEY) {
            Ok(Some(_)) => {
                tracing::debug!("Auto-import already done");
                return false;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Failed to read auto-import flag: {}", e);
                return false;
            }
        }

        let text = match source.fetch().await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Auto-import from {} failed: {}", source.describe(), e);
                return false;
            }
        };

        if self.import(&text).is_err() {
            return false;
        }

        if let Err(e) = self.store.set(AUTO_IMPORT_KEY, "1") {
            tracing::warn!("Failed to save auto-import flag: {}", e);
        }
        tracing::info!("Auto-imported vocabulary from {}", source.describe());
        true
    }

    pub fn dictionary(&self) -> &VocabDictionary {
        &self.dictionary
    }

    pub fn notebook(&self) -> &Notebook {
        &self.notebook
    }

    pub fn notebook_mut(&mut self) -> &mut Notebook {
        &mut self.notebook
    }

    /// The notebook capped at the configured display size
    pub fn view(&self) -> NotebookView<'_> {
        self.notebook.view(self.display_cap)
    }

    pub fn unknown_words(&self) -> Vec<&UnknownWord> {
        self.extractor.unknown_words()
    }

    pub fn extract_from_user(&self) -> bool {
        self.extract_from_user
    }

    pub fn set_extract_from_user(&mut self, enabled: bool) {
        tracing::info!("Extraction from user input {}", if enabled { "enabled" } else { "disabled" });
        self.extract_from_user = enabled;
    }
}

#[cfg(test)]
mod tests {
    use kotoba_core::MemoryStore;
    use serde_json::json;

    use super::*;

    fn processor() -> JapaneseProcessor {
        JapaneseProcessor::open(Arc::new(MemoryStore::new()), &Config::default())
    }

    #[test]
    fn agent_reply_is_recorded_once() {
        let mut processor = processor();

        let first = processor.handle_text("今日は勉強します", TextSource::AgentReply, 10);
        let words: Vec<&str> = first.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["今日", "勉強"]);

        let second = processor.handle_text("勉強", TextSource::AgentReply, 20);
        assert!(second.is_empty());
        assert_eq!(processor.notebook().len(), 2);
    }

    #[test]
    fn user_input_needs_opt_in() {
        let mut processor = processor();
        assert!(processor.handle_text("コーヒー", TextSource::UserInput, 1).is_empty());
        assert!(processor.notebook().is_empty());

        processor.set_extract_from_user(true);
        let recorded = processor.handle_text("コーヒー", TextSource::UserInput, 2);
        assert_eq!(recorded[0].source, "user input");
    }

    #[test]
    fn non_string_payloads_are_ignored() {
        let mut processor = processor();
        assert!(processor.handle_value(&json!(null), TextSource::Manual, 1).is_empty());
        assert!(processor.handle_value(&json!([1, 2]), TextSource::Manual, 1).is_empty());
        assert_eq!(
            processor
                .handle_value(&json!("友達"), TextSource::Manual, 1)
                .len(),
            1
        );
    }

    #[test]
    fn preview_does_not_record() {
        let mut processor = processor();
        let entries = processor.preview("コーヒー", TextSource::Manual, 1);
        assert_eq!(entries.len(), 1);
        assert!(processor.notebook().is_empty());
    }

    #[test]
    fn import_resolves_pending_words() {
        let mut processor = processor();
        processor.handle_text("元気", TextSource::AgentReply, 1);
        assert_eq!(processor.unknown_words().len(), 1);

        let summary = processor.import("元気,genki,healthy").unwrap();
        assert_eq!(summary.added, 1);
        assert!(processor.unknown_words().is_empty());
        assert_eq!(processor.dictionary().lookup("元気").unwrap().meaning, "healthy");
    }

    #[test]
    fn half_width_import_matches_half_width_text() {
        let mut processor = processor();
        processor.import("ｺｰﾋｰ,koohii,coffee").unwrap();

        let recorded = processor.handle_text("ｺｰﾋｰください", TextSource::AgentReply, 1);
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].word, "コーヒー");
        assert_eq!(recorded[0].meaning, "coffee");
        assert!(processor.unknown_words().is_empty());
    }
}
