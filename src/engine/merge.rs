//! Per-page configuration layered over the global `[iframe]` section.
//!
//! Precedence: page front matter > `[iframe]` in iframe.toml > built-in default.
//!
//! ```toml
//! # front matter of a page
//! [iframe]
//! slug = "widget"
//! template = "iframe/widget"
//! ```
//!
//! A bare boolean is shorthand for `active`:
//!
//! ```toml
//! iframe = false
//! ```

use crate::config::IframeConfig;

/// Front matter key holding the page-level overrides.
pub const HEADER_KEY: &str = "iframe";

/// Page-level settings, every field optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSettings {
    pub active: Option<bool>,
    pub slug: Option<String>,
    pub template: Option<String>,
}

/// The two accepted shapes of the `iframe` front matter entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOverride {
    Toggle(bool),
    Settings(PageSettings),
}

impl PageOverride {
    /// Read the override from a page header.
    ///
    /// Returns `None` when the key is absent or has a shape we don't accept,
    /// in which case the global settings apply unchanged. Inside a table each
    /// key is read on its own: a mistyped field falls back alone.
    pub fn from_header(header: &toml::Table) -> Option<Self> {
        match header.get(HEADER_KEY)? {
            toml::Value::Boolean(active) => Some(Self::Toggle(*active)),
            toml::Value::Table(table) => Some(Self::Settings(PageSettings {
                active: table.get("active").and_then(toml::Value::as_bool),
                slug: table
                    .get("slug")
                    .and_then(toml::Value::as_str)
                    .map(str::to_owned),
                template: table
                    .get("template")
                    .and_then(toml::Value::as_str)
                    .map(str::to_owned),
            })),
            _ => None,
        }
    }

    fn into_settings(self) -> PageSettings {
        match self {
            Self::Toggle(active) => PageSettings {
                active: Some(active),
                ..PageSettings::default()
            },
            Self::Settings(settings) => settings,
        }
    }
}

/// Effective settings for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedConfig {
    pub active: bool,
    pub slug: String,
    pub template: String,
}

impl MergedConfig {
    pub fn resolve(global: &IframeConfig, header: &toml::Table) -> Self {
        let page = PageOverride::from_header(header)
            .map(PageOverride::into_settings)
            .unwrap_or_default();

        Self {
            active: page.active.unwrap_or(global.active),
            slug: page.slug.unwrap_or_else(|| global.slug.clone()),
            template: page.template.unwrap_or_else(|| global.template.clone()),
        }
    }
}
