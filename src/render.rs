//! Template lookup and placeholder rendering.
//!
//! A template name like `iframe/default` resolves to `iframe/default.html` in
//! the first template directory that has it. Without a match, the embedded
//! templates are used. Rendering only fills placeholders:
//!
//! | Placeholder  | Value                  |
//! |--------------|------------------------|
//! | `{title}`    | page title             |
//! | `{route}`    | page route             |
//! | `{template}` | template name          |
//! | `{content}`  | page body              |

use crate::{events::TemplatePaths, page::Page};
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Component, Path, PathBuf},
};

/// Fallback for any template without a file (embedded at compile time)
const PAGE_TEMPLATE: &str = include_str!("embed/templates/page.html");

/// Built-in iframe template (embedded at compile time)
const IFRAME_TEMPLATE: &str = include_str!("embed/templates/iframe/default.html");

/// Extension appended to template names
const TEMPLATE_EXTENSION: &str = "html";

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    paths: TemplatePaths,
}

impl Renderer {
    pub fn new(paths: TemplatePaths) -> Self {
        Self { paths }
    }

    /// Template file for `template`, searched in path order.
    pub fn resolve(&self, template: &str) -> Option<PathBuf> {
        let relative = template_file(template)?;
        self.paths
            .iter()
            .map(|dir| dir.join(&relative))
            .find(|path| path.is_file())
    }

    pub fn render(&self, page: &Page) -> Result<String> {
        let source = match self.resolve(&page.template) {
            Some(path) => fs::read_to_string(&path)
                .with_context(|| format!("Failed to read template {}", path.display()))?,
            None => builtin(&page.template).to_owned(),
        };
        Ok(fill(&source, page))
    }
}

/// `iframe/default` → `iframe/default.html`. Names that would escape the
/// template directory resolve to nothing.
fn template_file(template: &str) -> Option<PathBuf> {
    if template.is_empty() {
        return None;
    }
    let path = Path::new(template);
    let plain = path
        .components()
        .all(|component| matches!(component, Component::Normal(_)));
    plain.then(|| PathBuf::from(format!("{template}.{TEMPLATE_EXTENSION}")))
}

fn builtin(template: &str) -> &'static str {
    match template {
        "iframe/default" => IFRAME_TEMPLATE,
        _ => PAGE_TEMPLATE,
    }
}

#[allow(clippy::literal_string_with_formatting_args)]
/// Substitute `{title}`, `{route}`, `{template}` and `{content}` in one pass.
///
/// Substituted text is never scanned again, so page values containing
/// placeholder syntax come out literally. Unknown `{...}` is kept as-is.
fn fill(source: &str, page: &Page) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        let value = tail.find('}').and_then(|end| {
            let value = match &tail[1..end] {
                "title" => &page.title,
                "route" => &page.route,
                "template" => &page.template,
                "content" => &page.content,
                _ => return None,
            };
            Some((value, end))
        });

        match value {
            Some((value, end)) => {
                out.push_str(&escape_html(value));
                rest = &tail[end + 1..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
