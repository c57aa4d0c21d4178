//! Host page model and the lookup seam the override engine consumes.

/// A page as the host sees it.
///
/// The override engine reads `published`, `is_page`, `template` and
/// `header`, and writes nothing except `template`.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Normalized route, e.g. `/shop/bikes`. The root page is `/`.
    pub route: String,
    /// Display title
    pub title: String,
    /// Template name used to render the page
    pub template: String,
    /// Unpublished pages are never served or overridden
    pub published: bool,
    /// `false` for listing nodes (folders without page content)
    pub is_page: bool,
    /// Front matter, kept verbatim
    pub header: toml::Table,
    /// Body below the front matter
    pub content: String,
}

impl Page {
    /// A published content page with an empty header.
    pub fn new(route: impl Into<String>, template: impl Into<String>) -> Self {
        let route = route.into();
        Self {
            title: title_from_route(&route),
            route,
            template: template.into(),
            published: true,
            is_page: true,
            header: toml::Table::new(),
            content: String::new(),
        }
    }

    /// A listing node: resolvable, but not a concrete page.
    pub fn listing(route: impl Into<String>) -> Self {
        Self {
            is_page: false,
            ..Self::new(route, "")
        }
    }

    pub fn with_header(mut self, header: toml::Table) -> Self {
        self.header = header;
        self
    }

    pub fn unpublished(mut self) -> Self {
        self.published = false;
        self
    }
}

/// Last route segment, or `Home` for the root.
fn title_from_route(route: &str) -> String {
    route
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or("Home")
        .to_owned()
}

/// Page lookup owned by the host.
///
/// Returns a mutable handle because an override rewrites the page template.
pub trait PageResolver {
    fn find_mut(&mut self, route: &str) -> Option<&mut Page>;
}
