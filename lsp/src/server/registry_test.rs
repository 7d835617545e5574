#[cfg(test)]
mod tests {
    use crate::server::registry::*;

    #[test]
    fn official_images_get_library_prefix() {
        assert_eq!(hub_repository("node").as_deref(), Some("library/node"));
        assert_eq!(hub_repository("Bitnami/Redis").as_deref(), Some("bitnami/redis"));
        assert_eq!(hub_repository("ghcr.io/owner/app"), None);
        assert_eq!(hub_repository("localhost/app"), None);
        assert_eq!(hub_repository("$BASE"), None);
        assert_eq!(hub_repository("a//b"), None);
    }

    #[test]
    fn tags_are_narrowed_by_prefix() {
        let tags: Vec<String> = ["18", "latest", "16", "18-alpine"]
            .iter()
            .map(|t| t.to_string())
            .collect();
        assert_eq!(filter_tags(&tags, Some("18")), vec!["18", "18-alpine"]);
        assert_eq!(filter_tags(&tags, Some("1")), vec!["18", "16", "18-alpine"]);
        assert_eq!(filter_tags(&tags, None), tags);
        assert!(filter_tags(&tags, Some("x")).is_empty());
    }

    #[tokio::test]
    async fn unreachable_registry_yields_no_tags() {
        let source = DockerHubTags::with_base_url("http://127.0.0.1:9");
        assert!(source.tags("node", None).await.is_empty());
        assert!(source.tags("node", None).await.is_empty());
    }

    #[tokio::test]
    async fn foreign_registries_are_not_queried() {
        let source = DockerHubTags::with_base_url("http://127.0.0.1:9");
        assert!(source.tags("quay.io/org/image", Some("1")).await.is_empty());
    }
}
