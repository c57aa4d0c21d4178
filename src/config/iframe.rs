//! `[iframe]` section configuration.
//!
//! Global plugin settings. `active`, `slug` and `template` may be overridden
//! per page through front matter; everything else is site-wide.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::PathBuf};

/// `[iframe]` section in iframe.toml - override plugin settings.
///
/// # Example
/// ```toml
/// [iframe]
/// slug = "embed"
/// template = "iframe/minimal"
/// enable_on_routes = ["/shop", "/restaurants"]
/// disable_on_routes = ["/shop/private"]
/// enable_on_templates = ["product"]
///
/// [iframe.enable_on_header]
/// "taxonomy.category" = "partner"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct IframeConfig {
    /// Load the plugin at all.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enabled: bool,

    /// Default for the per-page `active` switch.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub active: bool,

    /// Trailing path segment that triggers the override.
    #[serde(default = "defaults::iframe::slug")]
    #[educe(Default = defaults::iframe::slug())]
    pub slug: String,

    /// Template assigned to the parent page on override.
    #[serde(default = "defaults::iframe::template")]
    #[educe(Default = defaults::iframe::template())]
    pub template: String,

    /// Template directory the plugin registers with the host.
    #[serde(default = "defaults::iframe::templates")]
    #[educe(Default = defaults::iframe::templates())]
    pub templates: PathBuf,

    /// Request paths (exact or string prefix) on which the plugin activates.
    #[serde(default = "defaults::iframe::enable_on_routes")]
    #[educe(Default = defaults::iframe::enable_on_routes())]
    pub enable_on_routes: Vec<String>,

    /// Request paths on which the plugin never activates. Exact match only.
    #[serde(default)]
    pub disable_on_routes: Vec<String>,

    /// Page templates the override is restricted to. Empty means any.
    #[serde(default)]
    pub enable_on_templates: Vec<String>,

    /// Header values the page must carry. Keys may be dotted paths.
    #[serde(default)]
    pub enable_on_header: BTreeMap<String, toml::Value>,
}
