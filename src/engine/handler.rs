//! Not-found override handler.
//!
//! Given a path the host could not resolve, looks at the parent page and
//! walks a fixed chain of gates:
//!
//! ```text
//! parent exists ─► published page ─► active ─► slug ─► template ─► header
//!      │                │               │        │         │          │
//!      └────────────────┴───────────────┴────────┴─────────┴──────────┴─► Decline
//!                                                                         │
//!                                                   all pass ─► Override(template)
//! ```
//!
//! Every failure is a silent decline; the host keeps its own 404.

use super::{merge::MergedConfig, request::RequestContext};
use crate::{
    config::IframeConfig,
    page::{Page, PageResolver},
};
use std::{fmt, sync::Arc};

/// Which gate turned the request down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclineReason {
    NoParentPage,
    NotPublishedPage,
    Inactive,
    SlugMismatch,
    TemplateNotAllowed,
    HeaderMismatch,
}

impl fmt::Display for DeclineReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoParentPage => "no parent page",
            Self::NotPublishedPage => "parent is not a published page",
            Self::Inactive => "inactive on this page",
            Self::SlugMismatch => "slug does not match",
            Self::TemplateNotAllowed => "page template not enabled",
            Self::HeaderMismatch => "page header does not match",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Decline(DeclineReason),
    /// Render the parent page with this template and stop not-found processing.
    Override(String),
}

impl Decision {
    pub const fn is_override(&self) -> bool {
        matches!(self, Self::Override(_))
    }
}

/// Evaluates the gate chain against the global `[iframe]` settings.
#[derive(Debug, Clone)]
pub struct NotFoundHandler {
    config: Arc<IframeConfig>,
}

impl NotFoundHandler {
    pub fn new(config: Arc<IframeConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IframeConfig {
        &self.config
    }

    /// Decide for `request`. On override the parent page's template is
    /// rewritten in place.
    pub fn handle<R>(&self, request: &RequestContext, pages: &mut R) -> Decision
    where
        R: PageResolver + ?Sized,
    {
        let Some(page) = pages.find_mut(&request.parent()) else {
            return Decision::Decline(DeclineReason::NoParentPage);
        };

        match self.evaluate(request, page) {
            Ok(template) => {
                page.template.clone_from(&template);
                Decision::Override(template)
            }
            Err(reason) => Decision::Decline(reason),
        }
    }

    fn evaluate(&self, request: &RequestContext, page: &Page) -> Result<String, DeclineReason> {
        if !page.published || !page.is_page {
            return Err(DeclineReason::NotPublishedPage);
        }

        let merged = MergedConfig::resolve(&self.config, &page.header);
        if !merged.active {
            return Err(DeclineReason::Inactive);
        }

        if merged.slug != request.basename() {
            return Err(DeclineReason::SlugMismatch);
        }

        let templates = &self.config.enable_on_templates;
        if !templates.is_empty() && !templates.contains(&page.template) {
            return Err(DeclineReason::TemplateNotAllowed);
        }

        let all_match = self
            .config
            .enable_on_header
            .iter()
            .all(|(key, expected)| header_value(&page.header, key) == Some(expected));
        if !all_match {
            return Err(DeclineReason::HeaderMismatch);
        }

        Ok(merged.template)
    }
}

/// Look up a dotted key (`taxonomy.category`) in nested header tables.
pub fn header_value<'a>(header: &'a toml::Table, key: &str) -> Option<&'a toml::Value> {
    let mut segments = key.split('.');
    let mut value = header.get(segments.next()?)?;
    for segment in segments {
        value = value.as_table()?.get(segment)?;
    }
    Some(value)
}
