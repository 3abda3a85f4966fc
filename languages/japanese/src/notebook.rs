use std::collections::HashSet;
use std::sync::Arc;

use kotoba_core::KeyValueStore;
use kotoba_types::NotebookEntry;

use crate::import::{self, ImportError};

/// Storage key of the persisted entry array
pub const NOTEBOOK_KEY: &str = "vocabulary_list";

/// A display slice of the notebook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotebookView<'a> {
    pub entries: &'a [NotebookEntry],
    pub total: usize,
    /// Entries past the display cap, still in storage
    pub hidden: usize,
}

/// Ordered, persisted list of discovered words, one entry per word
pub struct Notebook {
    entries: Vec<NotebookEntry>,
    words: HashSet<String>,
    store: Arc<dyn KeyValueStore>,
}

impl Notebook {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            entries: Vec::new(),
            words: HashSet::new(),
            store,
        }
    }

    pub fn open(store: Arc<dyn KeyValueStore>) -> Self {
        let mut notebook = Self::new(store);
        notebook.load();
        notebook
    }

    /// Read persisted entries; unreadable or corrupt data leaves the notebook empty
    pub fn load(&mut self) {
        self.entries = match self.store.get(NOTEBOOK_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("Stored notebook is corrupt, starting empty: {}", e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read notebook, starting empty: {}", e);
                Vec::new()
            }
        };

        self.words = self.entries.iter().map(|e| e.word.clone()).collect();
        if self.words.len() != self.entries.len() {
            tracing::debug!(
                "Notebook holds {} duplicate entries; run dedupe to remove them",
                self.entries.len() - self.words.len()
            );
        }
        tracing::info!("Loaded {} notebook entries", self.entries.len());
    }

    fn save(&self) {
        let raw = match serde_json::to_string(&self.entries) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to serialize notebook: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(NOTEBOOK_KEY, &raw) {
            tracing::warn!("Failed to save notebook: {}", e);
        }
    }

    /// Append entries for words not yet in the notebook. Returns the appended ones.
    pub fn record(&mut self, candidates: Vec<NotebookEntry>) -> Vec<NotebookEntry> {
        let mut appended = Vec::new();
        for entry in candidates {
            if self.words.insert(entry.word.clone()) {
                appended.push(entry);
            }
        }

        if !appended.is_empty() {
            self.entries.extend(appended.iter().cloned());
            self.save();
            tracing::debug!(
                "Recorded {} new words ({} total)",
                appended.len(),
                self.entries.len()
            );
        }
        appended
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.words.clear();
        self.save();
        tracing::info!("Notebook cleared");
    }

    /// Keep the first entry for each word; returns how many were removed
    pub fn dedupe(&mut self) -> usize {
        let before = self.entries.len();
        let mut seen = HashSet::new();
        self.entries.retain(|entry| seen.insert(entry.word.clone()));
        self.words = seen;
        self.save();

        let removed = before - self.entries.len();
        tracing::info!("Removed {} duplicate notebook entries", removed);
        removed
    }

    pub fn export(&self) -> &[NotebookEntry] {
        &self.entries
    }

    pub fn export_csv(&self) -> Result<String, ImportError> {
        import::notebook_csv(&self.entries)
    }

    /// The first `cap` entries; storage is never truncated
    pub fn view(&self, cap: usize) -> NotebookView<'_> {
        let shown = cap.min(self.entries.len());
        NotebookView {
            entries: &self.entries[..shown],
            total: self.entries.len(),
            hidden: self.entries.len() - shown,
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
