use serde::{Deserialize, Serialize};

fn default_auto_import() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Import `auto_import_source` once, on first run
    #[serde(default = "default_auto_import")]
    pub auto_import: bool,
    /// File path or http(s) URL of a bundled vocabulary list
    #[serde(default)]
    pub auto_import_source: Option<String>,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            auto_import: default_auto_import(),
            auto_import_source: None,
        }
    }
}
