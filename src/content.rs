//! Content tree: the host's page store.
//!
//! Every page is a folder. The folder's markdown file names the page
//! template, and its TOML front matter becomes the page header:
//!
//! ```text
//! content/
//! ├── default.md              → /            (template "default")
//! ├── 01.shop/
//! │   ├── product.md          → /shop        (template "product")
//! │   └── 02.bikes/
//! │       └── default.md      → /shop/bikes
//! └── archive/                → /archive     (listing node, not a page)
//!     └── 2024/
//!         └── post.md         → /archive/2024
//! ```
//!
//! ```markdown
//! +++
//! title = "Shop"
//! published = true
//! [iframe]
//! template = "iframe/shop"
//! +++
//! Page body.
//! ```

use crate::page::{Page, PageResolver};
use anyhow::Result;
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use walkdir::WalkDir;

/// Front matter delimiter line.
const FRONT_MATTER_FENCE: &str = "+++";

/// Extension of page files.
const PAGE_EXTENSION: &str = "md";

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to walk content directory")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid front matter in `{0}`: {1}")]
    FrontMatter(PathBuf, String),

    #[error("Front matter parsing error in `{0}`")]
    Toml(PathBuf, #[source] toml::de::Error),
}

/// All pages of a site, keyed by route.
#[derive(Debug, Clone, Default)]
pub struct PageTree {
    pages: BTreeMap<String, Page>,
}

impl PageTree {
    /// Load every folder under `root` as a page or listing node.
    pub fn load(root: &Path) -> Result<Self> {
        let mut pages = BTreeMap::new();

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(&e.file_name().to_string_lossy()));

        for entry in walker {
            let entry = entry.map_err(ContentError::Walk)?;
            if !entry.file_type().is_dir() {
                continue;
            }

            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            let route = route_from_relative(relative);
            let page = match find_page_file(entry.path())? {
                Some(file) => load_page(&route, &file)?,
                None => Page::listing(route.clone()),
            };
            pages.insert(route, page);
        }

        Ok(Self { pages })
    }

    pub fn from_pages(pages: impl IntoIterator<Item = Page>) -> Self {
        Self {
            pages: pages
                .into_iter()
                .map(|page| (normalize_route(&page.route), page))
                .collect(),
        }
    }

    pub fn find(&self, route: &str) -> Option<&Page> {
        self.pages.get(&normalize_route(route))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl PageResolver for PageTree {
    fn find_mut(&mut self, route: &str) -> Option<&mut Page> {
        self.pages.get_mut(&normalize_route(route))
    }
}

// ============================================================================
// Routes
// ============================================================================

/// `/shop/` and `shop` both become `/shop`; the empty route becomes `/`.
pub fn normalize_route(route: &str) -> String {
    let segments: Vec<&str> = route.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

/// Build a route from a folder path relative to the content root.
fn route_from_relative(relative: &Path) -> String {
    let segments: Vec<String> = relative
        .components()
        .map(|c| strip_order_prefix(&c.as_os_str().to_string_lossy()).to_owned())
        .collect();
    format!("/{}", segments.join("/"))
}

/// `01.shop` → `shop`. Names without a numeric prefix are returned as-is.
fn strip_order_prefix(name: &str) -> &str {
    match name.split_once('.') {
        Some((prefix, rest))
            if !prefix.is_empty() && !rest.is_empty() && prefix.bytes().all(|b| b.is_ascii_digit()) =>
        {
            rest
        }
        _ => name,
    }
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

// ============================================================================
// Page Files
// ============================================================================

/// First `*.md` file directly inside `dir`, by name.
fn find_page_file(dir: &Path) -> Result<Option<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|err| ContentError::Io(dir.to_path_buf(), err))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file() && path.extension().is_some_and(|ext| ext == PAGE_EXTENSION)
        })
        .collect();
    files.sort();
    Ok(files.into_iter().next())
}

fn load_page(route: &str, file: &Path) -> Result<Page> {
    let raw = fs::read_to_string(file).map_err(|err| ContentError::Io(file.to_path_buf(), err))?;
    let (header, content) = split_front_matter(&raw, file)?;

    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut page = Page::new(route, stem).with_header(header);
    if let Some(title) = page.header.get("title").and_then(|v| v.as_str()) {
        page.title = title.to_owned();
    }
    if let Some(template) = page.header.get("template").and_then(|v| v.as_str()) {
        page.template = template.to_owned();
    }
    if let Some(published) = page.header.get("published").and_then(|v| v.as_bool()) {
        page.published = published;
    }
    page.content = content.to_owned();

    Ok(page)
}

/// Split `+++`-fenced TOML front matter from the body.
///
/// A file without an opening fence has an empty header.
pub fn split_front_matter<'a>(raw: &'a str, file: &Path) -> Result<(toml::Table, &'a str)> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let Some(rest) = strip_fence_line(raw) else {
        return Ok((toml::Table::new(), raw));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FRONT_MATTER_FENCE {
            let header = toml::from_str(&rest[..offset])
                .map_err(|err| ContentError::Toml(file.to_path_buf(), err))?;
            let body = &rest[offset + line.len()..];
            return Ok((header, body));
        }
        offset += line.len();
    }

    Err(ContentError::FrontMatter(
        file.to_path_buf(),
        format!("missing closing `{FRONT_MATTER_FENCE}`"),
    )
    .into())
}

/// Text after the opening fence line, if `raw` starts with one.
fn strip_fence_line(raw: &str) -> Option<&str> {
    let (first, rest) = raw.split_once('\n').unwrap_or((raw, ""));
    (first.trim_end() == FRONT_MATTER_FENCE).then_some(rest)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn site() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "default.md", "+++\ntitle = \"Home\"\n+++\nWelcome");
        write(
            root,
            "01.shop/product.md",
            "+++\ntitle = \"Shop\"\n[taxonomy]\ncategory = \"bikes\"\n+++\nBuy things",
        );
        write(root, "01.shop/02.bikes/default.md", "No front matter");
        write(root, "archive/2024/post.md", "+++\npublished = false\n+++\n");
        write(root, "about/default.md", "+++\ntemplate = \"wide\"\n+++\n");
        write(root, ".git/config.md", "ignored");
        dir
    }

    #[test]
    fn test_load_routes() {
        let dir = site();
        let tree = PageTree::load(dir.path()).unwrap();

        let routes: Vec<&str> = tree.iter().map(|p| p.route.as_str()).collect();
        assert_eq!(
            routes,
            vec!["/", "/about", "/archive", "/archive/2024", "/shop", "/shop/bikes"]
        );
    }

    #[test]
    fn test_load_page_fields() {
        let dir = site();
        let tree = PageTree::load(dir.path()).unwrap();

        let shop = tree.find("/shop").unwrap();
        assert_eq!(shop.title, "Shop");
        assert_eq!(shop.template, "product");
        assert!(shop.published);
        assert!(shop.is_page);
        assert_eq!(shop.content, "Buy things");
        assert_eq!(
            shop.header["taxonomy"]["category"],
            toml::Value::String("bikes".into())
        );

        let bikes = tree.find("/shop/bikes").unwrap();
        assert_eq!(bikes.title, "bikes");
        assert_eq!(bikes.template, "default");
        assert_eq!(bikes.content, "No front matter");
        assert!(bikes.header.is_empty());
    }

    #[test]
    fn test_listing_and_unpublished() {
        let dir = site();
        let tree = PageTree::load(dir.path()).unwrap();

        assert!(!tree.find("/archive").unwrap().is_page);
        assert!(!tree.find("/archive/2024").unwrap().published);
    }

    #[test]
    fn test_template_override() {
        let dir = site();
        let tree = PageTree::load(dir.path()).unwrap();
        assert_eq!(tree.find("/about").unwrap().template, "wide");
    }

    #[test]
    fn test_invalid_front_matter() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "default.md", "+++\ntitle = \n+++\n");

        let err = PageTree::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Front matter parsing error"));
    }

    #[test]
    fn test_unterminated_front_matter() {
        let err = split_front_matter("+++\ntitle = \"x\"\n", Path::new("a.md")).unwrap_err();
        assert!(err.to_string().contains("missing closing"));
    }

    #[test]
    fn test_split_front_matter() {
        let (header, body) =
            split_front_matter("+++\ntitle = \"x\"\n+++\nbody\nmore", Path::new("a.md")).unwrap();
        assert_eq!(header["title"].as_str(), Some("x"));
        assert_eq!(body, "body\nmore");

        let (header, body) = split_front_matter("plain", Path::new("a.md")).unwrap();
        assert!(header.is_empty());
        assert_eq!(body, "plain");

        let (header, body) =
            split_front_matter("+++\r\ntitle = \"x\"\r\n+++\r\nbody", Path::new("a.md")).unwrap();
        assert_eq!(header["title"].as_str(), Some("x"));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_strip_order_prefix() {
        assert_eq!(strip_order_prefix("01.shop"), "shop");
        assert_eq!(strip_order_prefix("shop"), "shop");
        assert_eq!(strip_order_prefix("v1.shop"), "v1.shop");
        assert_eq!(strip_order_prefix("01."), "01.");
        assert_eq!(strip_order_prefix(".hidden"), ".hidden");
    }

    #[test]
    fn test_normalize_route() {
        assert_eq!(normalize_route(""), "/");
        assert_eq!(normalize_route("/"), "/");
        assert_eq!(normalize_route("shop/"), "/shop");
        assert_eq!(normalize_route("//shop//bikes"), "/shop/bikes");
    }

    #[test]
    fn test_find_mut_normalizes() {
        let mut tree = PageTree::from_pages([Page::new("/shop", "default")]);
        assert!(tree.find_mut("/shop/").is_some());
        assert!(tree.find_mut("shop").is_some());
        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
    }
}
