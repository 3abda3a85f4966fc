use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::notebook::NotebookConfig;
use self::segmenter::SegmenterConfig;
use self::storage::StorageConfig;

pub mod dictionary;
pub mod notebook;
pub mod segmenter;
pub mod storage;

pub use self::segmenter::FallbackPolicy;

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub segmenter: SegmenterConfig,
    pub notebook: NotebookConfig,
    pub dictionary: DictionaryConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Config::default();
        config.apply_overrides(|key| env::var(key).ok());
        config
    }

    /// Load a JSON profile, falling back to `Config::new()` when the file is missing.
    /// Environment overrides win over file values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::warn!(
                "Config file {} not found, using defaults",
                path.display()
            );
            return Ok(Self::new());
        }

        tracing::info!("Loading config from {}", path.display());
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file {}", path.display()))?;
        let mut config: Config = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.apply_overrides(|key| env::var(key).ok());
        Ok(config)
    }

    /// Apply `KOTOBA_*` overrides from a variable lookup
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("KOTOBA_DATA_DIR") {
            self.storage.data_dir = dir;
        }

        if let Some(cap) = lookup("KOTOBA_DISPLAY_CAP").and_then(|v| v.parse().ok()) {
            self.notebook.display_cap = cap;
        }

        if let Some(flag) = lookup("KOTOBA_EXTRACT_FROM_USER").and_then(|v| parse_flag(&v)) {
            self.notebook.extract_from_user = flag;
        }

        if let Some(source) = lookup("KOTOBA_AUTO_IMPORT_SOURCE") {
            self.dictionary.auto_import_source = Some(source).filter(|s| !s.trim().is_empty());
        }

        if let Some(raw) = lookup("KOTOBA_FALLBACK") {
            match FallbackPolicy::parse(&raw) {
                Some(policy) => self.segmenter.fallback = policy,
                None => tracing::warn!("Ignoring unknown KOTOBA_FALLBACK value: {raw}"),
            }
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.segmenter.fallback, FallbackPolicy::Refined);
        assert!(config.segmenter.normalize);
        assert!(!config.segmenter.emit_hiragana);
        assert_eq!(config.notebook.display_cap, 50);
        assert!(!config.notebook.extract_from_user);
        assert!(config.dictionary.auto_import);
        assert_eq!(config.dictionary.auto_import_source, None);
        assert_eq!(config.storage.data_dir, "kotoba-data");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"segmenter": {"fallback": "simple"}, "notebook": {}}"#)
                .unwrap();
        assert_eq!(config.segmenter.fallback, FallbackPolicy::Simple);
        assert!(config.segmenter.normalize);
        assert_eq!(config.segmenter.hiragana_min_len, 4);
        assert_eq!(config.notebook.display_cap, 50);
    }

    #[test]
    fn overrides_apply_and_bad_values_are_ignored() {
        let mut config = Config::default();
        config.apply_overrides(lookup(&[
            ("KOTOBA_DATA_DIR", "/tmp/kotoba"),
            ("KOTOBA_DISPLAY_CAP", "not-a-number"),
            ("KOTOBA_EXTRACT_FROM_USER", "yes"),
            ("KOTOBA_FALLBACK", "fancy"),
            ("KOTOBA_AUTO_IMPORT_SOURCE", "  "),
        ]));

        assert_eq!(config.storage.data_dir, "/tmp/kotoba");
        assert_eq!(config.notebook.display_cap, 50);
        assert!(config.notebook.extract_from_user);
        assert_eq!(config.segmenter.fallback, FallbackPolicy::Refined);
        assert_eq!(config.dictionary.auto_import_source, None);
    }

    #[test]
    fn load_reads_profile_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"notebook": {"display_cap": 10}}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.notebook.display_cap, 10);

        std::fs::write(&path, "{ not json").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
