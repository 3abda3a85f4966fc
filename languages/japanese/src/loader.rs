use std::path::PathBuf;

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Vocabulary file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read vocabulary file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },
}

/// Where an auto-import payload comes from
#[async_trait]
pub trait VocabSource: Send + Sync {
    /// Fetch the raw JSON, NDJSON or CSV text
    async fn fetch(&self) -> Result<String, LoadError>;

    fn describe(&self) -> String;
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl VocabSource for FileSource {
    async fn fetch(&self) -> Result<String, LoadError> {
        tracing::info!("Loading vocabulary from file: {}", self.path.display());
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(LoadError::FileNotFound(self.path.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

#[derive(Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl VocabSource for HttpSource {
    async fn fetch(&self) -> Result<String, LoadError> {
        tracing::info!("Fetching vocabulary from {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(LoadError::Status {
                status: response.status().as_u16(),
                url: self.url.clone(),
            });
        }

        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// HTTP for `http://` and `https://` locations, a local file otherwise
pub fn source_for(location: &str) -> Box<dyn VocabSource> {
    let location = location.trim();
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}
