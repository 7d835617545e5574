use std::sync::Arc;

use tokio::task;
use tokio::time::{sleep, Duration};
use tower_lsp::lsp_types::{request::WorkDoneProgressCreate, *};
use tracing::{debug, warn};

use crate::analyzer::{AnalysisResult, DockerAnalyzer};

use super::state::DockerLanguageServer;

impl DockerLanguageServer {
    pub(crate) async fn validate_document(&self, uri: &Url) -> Vec<Diagnostic> {
        match self.get_or_compute_analysis(uri).await {
            Some(analysis) => analysis.diagnostics.clone(),
            None => Vec::new(),
        }
    }

    pub(crate) async fn get_or_compute_analysis(&self, uri: &Url) -> Option<Arc<AnalysisResult>> {
        if let Some(doc) = self.documents.get(uri) {
            if let Some(cached) = doc.cached_analysis.clone() {
                return Some(cached);
            }
        }

        let settings = self.settings_for(uri).await;
        let (content_snapshot, version_snapshot, seq_snapshot) = {
            let doc = self.documents.get(uri)?;
            (doc.content.to_string(), doc.version, doc.debounce_seq)
        };

        let limiter = self.limiter();
        let _permit = limiter.acquire().await.ok();
        let computed_result = task::spawn_blocking(move || {
            DockerAnalyzer::with_settings(settings.validator).analyze(&content_snapshot)
        })
        .await;
        let computed = match computed_result {
            Ok(result) => Arc::new(result),
            Err(err) => {
                warn!("analysis of {} failed: {}", uri, err);
                return None;
            }
        };

        if let Some(mut doc) = self.documents.get_mut(uri) {
            if doc.version == version_snapshot && doc.debounce_seq == seq_snapshot {
                doc.cached_analysis = Some(computed.clone());
            }
        }
        Some(computed)
    }

    /// Publishes diagnostics for `uri` after `delay_ms`, unless a newer edit arrives first.
    pub(crate) async fn schedule_diagnostics(&self, uri: Url, scheduled_version: i32, delay_ms: u64) {
        let settings = self.settings_for(&uri).await;
        let documents = self.documents.clone();
        let client = self.client.clone();
        let limiter = self.limiter();
        tokio::spawn(async move {
            sleep(Duration::from_millis(delay_ms)).await;

            let (content_snapshot, seq_snapshot, version_snapshot, cached) = match documents.get(&uri) {
                Some(doc) => (
                    doc.content.to_string(),
                    doc.debounce_seq,
                    doc.version,
                    doc.cached_analysis.clone(),
                ),
                None => return,
            };
            if version_snapshot != scheduled_version {
                debug!("skipping stale diagnostics for {} v{}", uri, scheduled_version);
                return;
            }
            if let Some(cached) = cached {
                client
                    .publish_diagnostics(uri, cached.diagnostics.clone(), Some(version_snapshot))
                    .await;
                return;
            }

            let token = NumberOrString::String(format!("dockerls:diag:{}", uri));
            let _ = client
                .send_request::<WorkDoneProgressCreate>(WorkDoneProgressCreateParams { token: token.clone() })
                .await;
            client
                .send_notification::<notification::Progress>(ProgressParams {
                    token: token.clone(),
                    value: ProgressParamsValue::WorkDone(WorkDoneProgress::Begin(WorkDoneProgressBegin {
                        title: "Dockerfile: validating".to_string(),
                        cancellable: Some(false),
                        message: Some(uri.to_string()),
                        percentage: None,
                    })),
                })
                .await;

            let _permit = limiter.acquire().await.ok();
            let computed_result = task::spawn_blocking(move || {
                DockerAnalyzer::with_settings(settings.validator).analyze(&content_snapshot)
            })
            .await;

            match computed_result {
                Ok(computed) => {
                    let diagnostics = computed.diagnostics.clone();
                    if let Some(mut doc) = documents.get_mut(&uri) {
                        if doc.debounce_seq == seq_snapshot && doc.version == version_snapshot {
                            doc.cached_analysis = Some(Arc::new(computed));
                        }
                    }
                    client
                        .publish_diagnostics(uri.clone(), diagnostics, Some(version_snapshot))
                        .await;
                }
                Err(err) => warn!("validation of {} failed: {}", uri, err),
            }

            client
                .send_notification::<notification::Progress>(ProgressParams {
                    token,
                    value: ProgressParamsValue::WorkDone(WorkDoneProgress::End(WorkDoneProgressEnd {
                        message: Some("Validation complete".to_string()),
                    })),
                })
                .await;
        });
    }

    /// Re-validates every open document, e.g. after a settings change.
    pub(crate) async fn revalidate_all(&self) {
        let open: Vec<(Url, i32)> = self
            .documents
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().version))
            .collect();
        for (uri, version) in open {
            if let Some(mut doc) = self.documents.get_mut(&uri) {
                doc.cached_analysis = None;
                doc.debounce_seq = doc.debounce_seq.wrapping_add(1);
            }
            self.schedule_diagnostics(uri, version, 0).await;
        }
    }
}
