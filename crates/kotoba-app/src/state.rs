use std::sync::Arc;

use kotoba_config::Config;
use kotoba_core::{FileStore, KeyValueStore};
use kotoba_lang_japanese::{JapaneseProcessor, source_for};
use tokio::sync::RwLock;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub store: Arc<dyn KeyValueStore>,
}

impl AppState {
    /// File-backed state under the configured data directory
    pub fn new(config: Config) -> Self {
        let data_path = config.storage.data_path();
        tracing::info!("Using data directory {}", data_path.display());

        Self::with_store(config, Arc::new(FileStore::new(data_path)))
    }

    pub fn with_store(config: Config, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            store,
        }
    }

    /// Open the processor and run the one-time auto-import when configured
    pub async fn open_processor(&self) -> JapaneseProcessor {
        let config = self.config.read().await;
        let mut processor = JapaneseProcessor::open(self.store.clone(), &config);

        if config.dictionary.auto_import {
            match config.dictionary.auto_import_source.as_deref() {
                Some(location) => {
                    let source = source_for(location);
                    processor.auto_import_once(source.as_ref()).await;
                }
                None => tracing::debug!("Auto-import enabled but no source configured"),
            }
        }

        processor
    }
}
