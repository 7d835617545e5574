use dockerls_core::Analysis;
use tower_lsp::lsp_types::DocumentLink;
use tracing::debug;
use url::Url;

use super::utils::lsp_range;
use super::DockerAnalyzer;

const HUB: &str = "https://hub.docker.com";

/// Docker Hub page of an image reference, or `None` for other registries, variables and
/// `scratch`. Returns the page and the byte length of the repository part.
pub(crate) fn hub_page(image: &str) -> Option<(Url, usize)> {
    if image.is_empty() || image.contains('$') || image.eq_ignore_ascii_case("scratch") {
        return None;
    }
    let without_digest = image.split('@').next().unwrap_or(image);
    let last_slash = without_digest.rfind('/').map_or(0, |i| i + 1);
    let repository = match without_digest[last_slash..].find(':') {
        Some(colon) => &without_digest[..last_slash + colon],
        None => without_digest,
    };
    let mut parts = repository.split('/');
    let first = parts.next()?;
    let has_registry = repository.contains('/')
        && (first.contains('.') || first.contains(':') || first == "localhost");
    if has_registry || repository.split('/').any(str::is_empty) {
        return None;
    }
    let page = match repository.strip_prefix("library/") {
        Some(name) => format!("{}/_/{}", HUB, name),
        None if !repository.contains('/') => format!("{}/_/{}", HUB, repository),
        None => format!("{}/r/{}", HUB, repository),
    };
    match Url::parse(&page) {
        Ok(url) => Some((url, repository.len())),
        Err(err) => {
            debug!("skipping image link {}: {}", page, err);
            None
        }
    }
}

impl DockerAnalyzer {
    pub fn document_links(&self, model: &Analysis) -> Vec<DocumentLink> {
        let scopes = &model.scopes;
        scopes
            .stages
            .iter()
            .filter_map(|stage| {
                let span = stage.image_span?;
                if scopes.stage_references.iter().any(|r| r.span == span) {
                    return None;
                }
                let (target, len) = hub_page(&stage.from_image)?;
                let mut link_span = span;
                link_span.end = (span.start + len).min(span.end);
                Some(DocumentLink {
                    range: lsp_range(&model.document, link_span),
                    target: Some(target),
                    tooltip: Some("Open on Docker Hub".to_string()),
                    data: None,
                })
            })
            .collect()
    }
}
