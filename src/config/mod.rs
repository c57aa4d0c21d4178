//! Site configuration management for `iframe.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[site]`    | Content and template directories, admin route    |
//! | `[iframe]`  | Override plugin: slug, template, route filters   |
//! | `[serve]`   | Development server (port, interface)             |
//!
//! # Example
//!
//! ```toml
//! [site]
//! content = "content"
//! admin_route = "/admin"
//!
//! [iframe]
//! slug = "iframe"
//! enable_on_routes = ["/shop"]
//!
//! [iframe.enable_on_header]
//! embeddable = true
//!
//! [serve]
//! port = 5280
//! ```

pub mod defaults;
mod error;
mod iframe;
mod serve;
mod site;

pub use error::ConfigError;
pub use iframe::IframeConfig;
pub use serve::ServeConfig;
pub use site::SiteSection;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing iframe.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Host paths
    #[serde(default)]
    pub site: SiteSection,

    /// Override plugin settings
    #[serde(default)]
    pub iframe: IframeConfig,

    /// Development server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.site.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.site.root = Some(path.to_path_buf())
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());

        Self::update_option(&mut self.site.content, cli.content.as_ref());
        self.update_path_with_root(&root);

        if let Commands::Serve { interface, port } = &cli.command {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.site.content = Self::normalize_path(&root.join(&self.site.content));
        self.site.templates = Self::normalize_path(&root.join(&self.site.templates));
        self.iframe.templates = Self::normalize_path(&root.join(&self.iframe.templates));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration after CLI overrides have been applied
    pub fn validate(&self) -> Result<()> {
        if !self.site.content.is_dir() {
            bail!(ConfigError::Validation(format!(
                "[site.content] `{}` is not a directory",
                self.site.content.display()
            )));
        }

        let iframe = &self.iframe;
        if iframe.slug.is_empty() || iframe.slug.contains('/') {
            bail!(ConfigError::Validation(
                "[iframe.slug] must be a single non-empty path segment".into()
            ));
        }

        if iframe.template.is_empty() {
            bail!(ConfigError::Validation(
                "[iframe.template] must not be empty".into()
            ));
        }

        if let Some((key, _)) = iframe
            .enable_on_header
            .iter()
            .find(|(_, value)| value.is_table())
        {
            bail!(ConfigError::Validation(format!(
                "[iframe.enable_on_header] `{key}` must be a scalar or array, not a table"
            )));
        }

        self.serve.socket_addr()?;

        if let Some(admin) = &self.site.admin_route
            && !admin.starts_with('/')
        {
            bail!(ConfigError::Validation(
                "[site.admin_route] must start with `/`".into()
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
