use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::demo;
use crate::config::{AppConfig, ContentSource};
use crate::{Error, Result};

/// Access to the external content store.
///
/// The loader only ever asks for a whole collection by its store id and
/// gets back raw records; decoding happens on the caller's side.
#[async_trait::async_trait]
pub trait ContentStore: Send + Sync {
    /// Fetch every record of a collection
    async fn fetch_collection(&self, name: &str) -> Result<Vec<serde_json::Value>>;

    /// Human readable description for logs
    fn describe(&self) -> String;
}

/// Response envelope of `getAll`-style endpoints
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope {
    Items { items: Vec<serde_json::Value> },
    Bare(Vec<serde_json::Value>),
}

/// Parse a collection payload: either `{"items": [...]}` or a bare array
pub fn parse_items(bytes: &[u8]) -> Result<Vec<serde_json::Value>> {
    let envelope: Envelope = serde_json::from_slice(bytes)?;
    Ok(match envelope {
        Envelope::Items { items } => items,
        Envelope::Bare(items) => items,
    })
}

/// Content store reached over HTTP: `GET {base_url}/collections/{name}`
pub struct HttpContentStore {
    client: Client,
    base_url: Url,
}

impl HttpContentStore {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()?;

        // A trailing slash keeps the last path segment when joining
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)?;

        Ok(Self { client, base_url })
    }

    /// Resolve the endpoint URL of a collection
    pub fn collection_url(&self, name: &str) -> Result<Url> {
        Ok(self.base_url.join(&format!("collections/{}", name))?)
    }
}

#[async_trait::async_trait]
impl ContentStore for HttpContentStore {
    async fn fetch_collection(&self, name: &str) -> Result<Vec<serde_json::Value>> {
        let url = self.collection_url(name)?;
        tracing::debug!("Fetching collection from: {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch {
                collection: name.to_string(),
                message: format!("HTTP {} for URL: {}", status, url),
            });
        }

        let bytes = response.bytes().await?;
        parse_items(&bytes)
    }

    fn describe(&self) -> String {
        format!("http store at {}", self.base_url)
    }
}

/// Content store backed by `<dir>/<collection>.json` files
pub struct FileContentStore {
    dir: PathBuf,
}

impl FileContentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn collection_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", name))
    }
}

#[async_trait::async_trait]
impl ContentStore for FileContentStore {
    async fn fetch_collection(&self, name: &str) -> Result<Vec<serde_json::Value>> {
        let path = self.collection_path(name);
        let bytes = tokio::fs::read(&path).await.map_err(|e| Error::Fetch {
            collection: name.to_string(),
            message: format!("{}: {}", path.display(), e),
        })?;
        parse_items(&bytes)
    }

    fn describe(&self) -> String {
        format!("file store at {}", self.dir.display())
    }
}

#[derive(Debug, Clone, Default)]
struct Fixture {
    records: Vec<serde_json::Value>,
    latency: Duration,
    failure: Option<String>,
}

/// In-process content store with scripted latency and failures
#[derive(Debug, Default)]
pub struct MemoryContentStore {
    fixtures: HashMap<String, Fixture>,
    fetches: AtomicUsize,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve these records for a collection
    pub fn with_collection(mut self, name: &str, records: Vec<serde_json::Value>) -> Self {
        self.fixtures.entry(name.to_string()).or_default().records = records;
        self
    }

    /// Delay responses for a collection
    pub fn with_latency(mut self, name: &str, latency: Duration) -> Self {
        self.fixtures.entry(name.to_string()).or_default().latency = latency;
        self
    }

    /// Reject requests for a collection with this message
    pub fn with_failure(mut self, name: &str, message: &str) -> Self {
        self.fixtures.entry(name.to_string()).or_default().failure = Some(message.to_string());
        self
    }

    /// Number of fetches served so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }
}

#[async_trait::async_trait]
impl ContentStore for MemoryContentStore {
    async fn fetch_collection(&self, name: &str) -> Result<Vec<serde_json::Value>> {
        self.fetches.fetch_add(1, Ordering::Relaxed);

        let fixture = self.fixtures.get(name).cloned().unwrap_or_default();
        if !fixture.latency.is_zero() {
            tokio::time::sleep(fixture.latency).await;
        }

        match fixture.failure {
            Some(message) => Err(Error::Fetch {
                collection: name.to_string(),
                message,
            }),
            None => Ok(fixture.records),
        }
    }

    fn describe(&self) -> String {
        format!("memory store with {} collections", self.fixtures.len())
    }
}

/// Build the content store selected in the configuration
pub fn open_store(config: &AppConfig) -> Result<Arc<dyn ContentStore>> {
    let store: Arc<dyn ContentStore> = match config.content.source {
        ContentSource::Http => Arc::new(HttpContentStore::new(
            &config.content.base_url,
            config.content.request_timeout_secs,
        )?),
        ContentSource::File => Arc::new(FileContentStore::new(config.content_dir())),
        ContentSource::Demo => Arc::new(demo::demo_store()),
    };
    tracing::info!("Using {}", store.describe());
    Ok(store)
}
