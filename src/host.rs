//! Minimal host: page tree, plugin activation and per-request resolution.
//!
//! Every request is its own activation. The plugin's route gate is computed
//! from that request's path, and a fresh [`EventBus`] holds its
//! subscriptions. Overrides are applied to a request-scoped copy of the
//! parent page, so the shared tree is never modified.
//!
//! ```text
//! respond(path)
//!     │
//!     ├── activate plugin for path ──► collect template paths
//!     │
//!     ├── published page at path ──► Outcome::Page
//!     │
//!     └── dispatch PageNotFound
//!             ├── handled ──► Outcome::Override
//!             └── otherwise ──► Outcome::NotFound
//! ```

use crate::{
    config::{IframeConfig, SiteConfig, SiteSection},
    content::{PageTree, normalize_route},
    engine::{Decision, RequestContext},
    events::{EventBus, NotFoundEvent, TemplatePaths},
    page::{Page, PageResolver},
    plugin::IframePlugin,
    render::Renderer,
};
use anyhow::{Context, Result};
use std::{fmt, sync::Arc};

/// Request-scoped view of the tree handing out copies of pages.
struct RequestScope<'a> {
    tree: &'a PageTree,
    page: Option<Page>,
}

impl<'a> RequestScope<'a> {
    fn new(tree: &'a PageTree) -> Self {
        Self { tree, page: None }
    }
}

impl PageResolver for RequestScope<'_> {
    fn find_mut(&mut self, route: &str) -> Option<&mut Page> {
        // Repeated lookups of the same route keep earlier writes.
        let route = normalize_route(route);
        if self.page.as_ref().is_none_or(|page| page.route != route) {
            self.page = Some(self.tree.find(&route)?.clone());
        }
        self.page.as_mut()
    }
}

/// What `check` found for a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    /// The path is a page; no not-found event would fire.
    Found,
    /// The plugin did not activate for this request.
    Inactive,
    Decided(Decision),
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found => f.write_str("page"),
            Self::Inactive => f.write_str("inactive"),
            Self::Decided(Decision::Override(template)) => write!(f, "override {template}"),
            Self::Decided(Decision::Decline(reason)) => write!(f, "decline ({reason})"),
        }
    }
}

/// What `respond` produced for a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Page(String),
    Override { route: String, template: String, html: String },
    NotFound,
}

pub struct Site {
    section: SiteSection,
    plugin: Arc<IframePlugin>,
    pages: PageTree,
}

impl Site {
    /// Load the content tree named by `config`.
    pub fn load(config: &SiteConfig) -> Result<Self> {
        let pages = PageTree::load(&config.site.content).with_context(|| {
            format!("Failed to load content from {}", config.site.content.display())
        })?;
        Ok(Self::new(config.site.clone(), config.iframe.clone(), pages))
    }

    pub fn new(section: SiteSection, iframe: IframeConfig, pages: PageTree) -> Self {
        Self {
            section,
            plugin: Arc::new(IframePlugin::new(Arc::new(iframe))),
            pages,
        }
    }

    pub fn pages(&self) -> &PageTree {
        &self.pages
    }

    pub fn is_admin(&self, path: &str) -> bool {
        self.section.is_admin(path)
    }

    /// Evaluate the override for `path` without rendering anything.
    ///
    /// `is_admin` forces an admin request; paths under `admin_route` are
    /// always treated as one.
    pub fn check(&self, path: &str, is_admin: bool) -> Check {
        let path = &normalize_route(path);
        let is_admin = is_admin || self.is_admin(path);
        if self.servable(path).is_some() {
            return Check::Found;
        }
        if !self.plugin.gate(path, is_admin).is_open() {
            return Check::Inactive;
        }

        let mut scope = RequestScope::new(&self.pages);
        Check::Decided(
            self.plugin
                .handler()
                .handle(&RequestContext::new(path), &mut scope),
        )
    }

    /// Resolve `path` the way the dev server does.
    pub fn respond(&self, path: &str) -> Result<Outcome> {
        let path = &normalize_route(path);
        let mut bus = EventBus::new();
        self.plugin.register(&mut bus, path, self.is_admin(path));

        let mut paths = TemplatePaths::new([self.section.templates.clone()]);
        bus.collect_template_paths(&mut paths);
        let renderer = Renderer::new(paths);

        if let Some(page) = self.servable(path) {
            return Ok(Outcome::Page(renderer.render(page)?));
        }

        let mut scope = RequestScope::new(&self.pages);
        let mut event = NotFoundEvent::new(RequestContext::new(path), &mut scope);
        bus.dispatch_not_found(&mut event);

        match event.page {
            Some(page) => Ok(Outcome::Override {
                html: renderer.render(&page)?,
                route: page.route,
                template: page.template,
            }),
            None => Ok(Outcome::NotFound),
        }
    }

    /// A published content page at `path`.
    fn servable(&self, path: &str) -> Option<&Page> {
        self.pages
            .find(path)
            .filter(|page| page.published && page.is_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DeclineReason;

    fn site(iframe: IframeConfig) -> Site {
        let section = SiteSection {
            admin_route: Some("/admin".into()),
            templates: "/nonexistent/templates".into(),
            ..SiteSection::default()
        };
        let pages = PageTree::from_pages([
            Page::new("/", "default"),
            Page::new("/shop", "product"),
            Page::new("/hidden", "default").unpublished(),
            Page::listing("/archive"),
            Page::new("/admin", "admin"),
        ]);
        Site::new(section, iframe, pages)
    }

    #[test]
    fn test_check_existing_page() {
        assert_eq!(site(IframeConfig::default()).check("/shop", false), Check::Found);
    }

    #[test]
    fn test_check_override() {
        assert_eq!(
            site(IframeConfig::default()).check("/shop/iframe", false),
            Check::Decided(Decision::Override("iframe/default".into()))
        );
    }

    #[test]
    fn test_check_declines() {
        let site = site(IframeConfig::default());

        assert_eq!(
            site.check("/hidden/iframe", false),
            Check::Decided(Decision::Decline(DeclineReason::NotPublishedPage))
        );
        assert_eq!(
            site.check("/archive/iframe", false),
            Check::Decided(Decision::Decline(DeclineReason::NotPublishedPage))
        );
        assert_eq!(
            site.check("/nowhere/iframe", false),
            Check::Decided(Decision::Decline(DeclineReason::NoParentPage))
        );
    }

    #[test]
    fn test_check_display() {
        let site = site(IframeConfig::default());

        assert_eq!(site.check("/shop", false).to_string(), "page");
        assert_eq!(site.check("/admin/iframe", false).to_string(), "inactive");
        assert_eq!(site.check("/shop/iframe", false).to_string(), "override iframe/default");
        assert_eq!(
            site.check("/nowhere/iframe", false).to_string(),
            "decline (no parent page)"
        );
    }

    #[test]
    fn test_check_inactive() {
        let site = site(IframeConfig {
            enable_on_routes: vec!["/blog".into()],
            ..IframeConfig::default()
        });
        assert_eq!(site.check("/shop/iframe", false), Check::Inactive);
        assert_eq!(site.check("/blog/iframe", true), Check::Inactive);
    }

    #[test]
    fn test_respond_page() {
        let html = match site(IframeConfig::default()).respond("/shop").unwrap() {
            Outcome::Page(html) => html,
            other => panic!("expected page, got {other:?}"),
        };
        assert!(html.contains("/shop"));
        assert!(html.contains("product"));
    }

    #[test]
    fn test_respond_override_is_request_scoped() {
        let site = site(IframeConfig::default());

        let (route, template, html) = match site.respond("/shop/iframe").unwrap() {
            Outcome::Override {
                route,
                template,
                html,
            } => (route, template, html),
            other => panic!("expected override, got {other:?}"),
        };
        assert_eq!(route, "/shop");
        assert_eq!(template, "iframe/default");
        assert!(html.contains("noindex"));

        assert_eq!(site.pages().find("/shop").unwrap().template, "product");
    }

    #[test]
    fn test_respond_not_found() {
        let site = site(IframeConfig::default());

        assert_eq!(site.respond("/shop/embed").unwrap(), Outcome::NotFound);
        assert_eq!(site.respond("/hidden").unwrap(), Outcome::NotFound);
    }

    #[test]
    fn test_respond_admin_is_never_overridden() {
        let site = site(IframeConfig::default());

        assert!(site.is_admin("/admin/iframe"));
        assert_eq!(site.respond("/admin/iframe").unwrap(), Outcome::NotFound);
    }

    #[test]
    fn test_trailing_slash_does_not_bypass_disabled_route() {
        let site = site(IframeConfig {
            disable_on_routes: vec!["/shop/iframe".into()],
            ..IframeConfig::default()
        });

        assert_eq!(site.check("/shop/iframe", false), Check::Inactive);
        assert_eq!(site.check("/shop/iframe/", false), Check::Inactive);
        assert_eq!(site.check("//shop//iframe", false), Check::Inactive);
        assert_eq!(site.respond("/shop/iframe/").unwrap(), Outcome::NotFound);
    }

    #[test]
    fn test_check_admin_path_with_trailing_slash() {
        assert_eq!(site(IframeConfig::default()).check("/admin/iframe/", false), Check::Inactive);
    }

    #[test]
    fn test_request_scope_keeps_writes() {
        let tree = PageTree::from_pages([Page::new("/a", "default"), Page::new("/b", "default")]);
        let mut scope = RequestScope::new(&tree);

        scope.find_mut("/a").unwrap().template = "changed".into();
        assert_eq!(scope.find_mut("/a").unwrap().template, "changed");
        assert_eq!(scope.find_mut("/b").unwrap().template, "default");
        assert!(scope.find_mut("/c").is_none());
        assert_eq!(tree.find("/a").unwrap().template, "default");
    }
}
