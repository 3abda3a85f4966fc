use serde::{Deserialize, Serialize};

fn default_display_cap() -> usize {
    50
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct NotebookConfig {
    /// Number of entries shown when listing; storage is never truncated
    #[serde(default = "default_display_cap")]
    pub display_cap: usize,
    /// Also extract vocabulary from what the user types
    pub extract_from_user: bool,
}

impl Default for NotebookConfig {
    fn default() -> Self {
        Self {
            display_cap: default_display_cap(),
            extract_from_user: false,
        }
    }
}
