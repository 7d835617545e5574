use std::sync::Arc;

use dockerls_core::diag::ValidatorSettings;
use serde::Deserialize;
use tokio::sync::Semaphore;
use tower_lsp::lsp_types::{ConfigurationItem, Url};
use tracing::{debug, warn};

use crate::analyzer::FormatterSettings;

use super::state::DockerLanguageServer;

pub(crate) const SECTION: &str = "docker.languageserver";

#[derive(Debug, Clone)]
pub(crate) struct ServerConfig {
    pub(crate) max_concurrent: usize,
    pub(crate) debounce_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 2,
            debounce_ms: 250,
        }
    }
}

/// Settings resolved for one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct DocumentSettings {
    pub(crate) validator: ValidatorSettings,
    pub(crate) formatter: FormatterSettings,
}

/// The `docker.languageserver` settings object.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DockerConfigSection {
    #[serde(default)]
    pub(crate) diagnostics: ValidatorSettings,
    #[serde(default)]
    pub(crate) formatter: FormatterSettings,
    #[serde(default)]
    pub(crate) performance: PerformanceConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PerformanceConfig {
    #[serde(default)]
    pub(crate) max_concurrent: Option<usize>,
    #[serde(default)]
    pub(crate) debounce_ms: Option<u64>,
}

impl From<DockerConfigSection> for DocumentSettings {
    fn from(section: DockerConfigSection) -> Self {
        Self {
            validator: section.diagnostics,
            formatter: section.formatter,
        }
    }
}

pub(crate) fn parse_section(value: serde_json::Value) -> Option<DockerConfigSection> {
    if value.is_null() {
        return None;
    }
    match serde_json::from_value::<DockerConfigSection>(value) {
        Ok(section) => Some(section),
        Err(err) => {
            warn!("ignoring malformed {} settings: {}", SECTION, err);
            None
        }
    }
}

impl DockerLanguageServer {
    async fn fetch_section(&self, scope_uri: Option<Url>) -> Option<DockerConfigSection> {
        if !self.supports_configuration() {
            return None;
        }
        let items = vec![ConfigurationItem {
            scope_uri,
            section: Some(SECTION.to_string()),
        }];
        let values = self.client.configuration(items).await.ok()?;
        values.into_iter().next().and_then(parse_section)
    }

    /// Reloads server-wide tuning and drops per-document settings.
    pub(crate) async fn load_config(&self) {
        self.document_settings.clear();
        let Some(cfg) = self.fetch_section(None).await else {
            return;
        };
        let permits = {
            let Ok(mut guard) = self.config.lock() else {
                return;
            };
            if let Some(v) = cfg.performance.max_concurrent.filter(|v| *v > 0) {
                guard.max_concurrent = v;
            }
            if let Some(v) = cfg.performance.debounce_ms {
                guard.debounce_ms = v;
            }
            guard.max_concurrent.max(1)
        };
        if let Ok(mut sem_arc) = self.compute_limiter.lock() {
            *sem_arc = Arc::new(Semaphore::new(permits));
        }
        debug!("configuration loaded, {} concurrent computations", permits);
    }

    /// Settings for `uri`, fetched once per document and cached until the next
    /// configuration change.
    pub(crate) async fn settings_for(&self, uri: &Url) -> DocumentSettings {
        if let Some(cached) = self.document_settings.get(uri) {
            return cached.clone();
        }
        let settings = self
            .fetch_section(Some(uri.clone()))
            .await
            .map(DocumentSettings::from)
            .unwrap_or_default();
        self.document_settings.insert(uri.clone(), settings.clone());
        settings
    }

    pub(crate) fn debounce_ms(&self) -> u64 {
        self.config
            .lock()
            .map(|c| c.debounce_ms)
            .unwrap_or_else(|_| ServerConfig::default().debounce_ms)
    }
}
