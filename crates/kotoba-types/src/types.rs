use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Text arriving from the chat surface, to be run through the extractor
    TextInput {
        text: String,
        source: TextSource,
    },
    /// Raw bulk-import payload (JSON, NDJSON or CSV)
    ImportText(String),
    ListUnknown,
    /// Words newly appended to the notebook by one extraction call
    Recorded(Vec<NotebookEntry>),
    ImportFinished(ImportSummary),
    Notice(String),
}

/// Provenance of a piece of text fed to the extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSource {
    AgentReply,
    UserInput,
    Manual,
}

impl TextSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextSource::AgentReply => "agent reply",
            TextSource::UserInput => "user input",
            TextSource::Manual => "manual",
        }
    }
}

/// One word in the vocabulary notebook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookEntry {
    pub word: String,
    #[serde(default)]
    pub romaji: String,
    #[serde(default)]
    pub meaning: String,
    #[serde(default)]
    pub source: String,
    /// Milliseconds since the Unix epoch
    #[serde(default)]
    pub timestamp: u64,
}

/// Counts reported after a bulk import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub added: usize,
    pub updated: usize,
    pub total: usize,
}
