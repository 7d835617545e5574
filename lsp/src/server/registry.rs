//! Image tag lookup for `FROM image:` completion.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use dashmap::DashMap;
use serde::Deserialize;
use tracing::{debug, warn};

const HUB_API: &str = "https://hub.docker.com";
const TIMEOUT: Duration = Duration::from_secs(5);

/// Source of tags for an image repository. Failures yield an empty list.
#[tower_lsp::async_trait]
pub trait TagSource: Send + Sync {
    /// Tags of `repository` starting with `prefix`, or all of them for `None`.
    async fn tags(&self, repository: &str, prefix: Option<&str>) -> Vec<String>;
}

/// Keeps the tags that start with `prefix`, in their original order.
pub fn filter_tags(tags: &[String], prefix: Option<&str>) -> Vec<String> {
    tags.iter()
        .filter(|tag| prefix.is_none_or(|p| tag.starts_with(p)))
        .cloned()
        .collect()
}

/// Docker Hub repository path for an image name, `library/` added for official images.
/// `None` for images hosted on other registries.
pub fn hub_repository(image: &str) -> Option<String> {
    let image = image.trim().to_ascii_lowercase();
    if image.is_empty() || image.contains(['$', '@', ' ']) {
        return None;
    }
    let mut parts = image.split('/');
    let first = parts.next()?;
    if image.contains('/') && (first.contains('.') || first.contains(':') || first == "localhost") {
        return None;
    }
    if image.split('/').any(str::is_empty) {
        return None;
    }
    if image.contains('/') {
        Some(image)
    } else {
        Some(format!("library/{}", image))
    }
}

#[derive(Debug, Deserialize)]
struct TagPage {
    #[serde(default)]
    results: Vec<TagEntry>,
}

#[derive(Debug, Deserialize)]
struct TagEntry {
    name: String,
}

/// Tags from the Docker Hub API, cached per repository for the life of the server.
pub struct DockerHubTags {
    client: Option<reqwest::Client>,
    base_url: String,
    cache: DashMap<String, Arc<Vec<String>>>,
}

impl Default for DockerHubTags {
    fn default() -> Self {
        Self::with_base_url(HUB_API)
    }
}

impl DockerHubTags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = match reqwest::Client::builder().timeout(TIMEOUT).build() {
            Ok(client) => Some(client),
            Err(err) => {
                warn!("registry client unavailable: {err}");
                None
            }
        };
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache: DashMap::new(),
        }
    }

    async fn fetch(&self, repository: &str) -> anyhow::Result<Vec<String>> {
        let client = self.client.as_ref().context("no http client")?;
        let url = format!("{}/v2/repositories/{}/tags?page_size=100", self.base_url, repository);
        let page: TagPage = client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?
            .error_for_status()?
            .json()
            .await
            .context("malformed tag listing")?;
        Ok(page.results.into_iter().map(|t| t.name).collect())
    }
}

#[tower_lsp::async_trait]
impl TagSource for DockerHubTags {
    async fn tags(&self, image: &str, prefix: Option<&str>) -> Vec<String> {
        let Some(repository) = hub_repository(image) else {
            return Vec::new();
        };
        if let Some(cached) = self.cache.get(&repository) {
            return filter_tags(&cached, prefix);
        }
        match self.fetch(&repository).await {
            Ok(tags) => {
                debug!("fetched {} tags for {}", tags.len(), repository);
                let matching = filter_tags(&tags, prefix);
                self.cache.insert(repository, Arc::new(tags));
                matching
            }
            Err(err) => {
                warn!("tag lookup for {} failed: {:#}", repository, err);
                Vec::new()
            }
        }
    }
}
