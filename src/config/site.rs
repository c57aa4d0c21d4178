//! `[site]` section configuration.
//!
//! Contains the host-side paths: where pages live and where templates are found.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[site]` section in iframe.toml - content tree and template locations.
///
/// # Example
/// ```toml
/// [site]
/// content = "pages"
/// templates = "theme/templates"
/// admin_route = "/admin"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteSection {
    /// Project root directory. Set from the CLI, never read from the file.
    #[serde(skip)]
    #[educe(Default = defaults::site::root())]
    pub root: Option<PathBuf>,

    /// Content directory containing one folder per page.
    #[serde(default = "defaults::site::content")]
    #[educe(Default = defaults::site::content())]
    pub content: PathBuf,

    /// Site-level template directory, searched before any plugin directory.
    #[serde(default = "defaults::site::templates")]
    #[educe(Default = defaults::site::templates())]
    pub templates: PathBuf,

    /// Requests under this route are admin requests and never activate plugins.
    #[serde(default = "defaults::site::admin_route")]
    #[educe(Default = defaults::site::admin_route())]
    pub admin_route: Option<String>,
}

impl SiteSection {
    /// Whether `path` belongs to the admin area.
    pub fn is_admin(&self, path: &str) -> bool {
        self.admin_route.as_deref().is_some_and(|admin| {
            path == admin
                || path
                    .strip_prefix(admin)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::path::PathBuf;

    #[test]
    fn test_site_config_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(config.site.content, PathBuf::from("content"));
        assert_eq!(config.site.templates, PathBuf::from("templates"));
        assert_eq!(config.site.admin_route, None);
    }

    #[test]
    fn test_root_is_not_configurable() {
        let config = r#"
            [site]
            root = "/elsewhere"
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);

        assert!(result.is_err());
    }

    #[test]
    fn test_is_admin() {
        let config: SiteConfig = toml::from_str(
            r#"
            [site]
            admin_route = "/admin"
        "#,
        )
        .unwrap();

        assert!(config.site.is_admin("/admin"));
        assert!(config.site.is_admin("/admin/pages/iframe"));
        assert!(!config.site.is_admin("/administration"));
        assert!(!config.site.is_admin("/shop/iframe"));
    }

    #[test]
    fn test_is_admin_without_admin_route() {
        let config: SiteConfig = toml::from_str("").unwrap();
        assert!(!config.site.is_admin("/admin"));
    }
}
