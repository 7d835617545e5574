use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use dashmap::DashMap;
use ropey::Rope;
use tokio::sync::Semaphore;
use tower_lsp::lsp_types::Url;
use tower_lsp::Client;

use crate::analyzer::AnalysisResult;

use super::config::{DocumentSettings, ServerConfig};
use super::registry::{DockerHubTags, TagSource};

/// An open Dockerfile and its cached analysis.
#[derive(Debug, Default)]
pub(crate) struct Document {
    pub(crate) content: Rope,
    pub(crate) version: i32,
    pub(crate) cached_analysis: Option<Arc<AnalysisResult>>,
    pub(crate) debounce_seq: u64,
    pub(crate) content_hash: Option<u64>,
}

/// Primary LSP server state shared across handlers.
pub(crate) struct DockerLanguageServer {
    pub(crate) client: Client,
    pub(crate) documents: Arc<DashMap<Url, Document>>,
    pub(crate) document_settings: DashMap<Url, DocumentSettings>,
    pub(crate) config: Mutex<ServerConfig>,
    pub(crate) compute_limiter: Mutex<Arc<Semaphore>>,
    pub(crate) tags: Arc<dyn TagSource>,
    pub(crate) configuration_capable: AtomicBool,
}

impl DockerLanguageServer {
    pub(crate) fn new(client: Client) -> Self {
        Self::with_tag_source(client, Arc::new(DockerHubTags::new()))
    }

    pub(crate) fn with_tag_source(client: Client, tags: Arc<dyn TagSource>) -> Self {
        Self {
            client,
            documents: Arc::new(DashMap::new()),
            document_settings: DashMap::new(),
            config: Mutex::new(ServerConfig::default()),
            compute_limiter: Mutex::new(Arc::new(Semaphore::new(2))),
            tags,
            configuration_capable: AtomicBool::new(false),
        }
    }

    pub(crate) fn supports_configuration(&self) -> bool {
        self.configuration_capable.load(Ordering::Relaxed)
    }

    pub(crate) fn set_supports_configuration(&self, value: bool) {
        self.configuration_capable.store(value, Ordering::Relaxed);
    }

    pub(crate) fn limiter(&self) -> Arc<Semaphore> {
        match self.compute_limiter.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
