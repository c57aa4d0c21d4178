//! Host event bus.
//!
//! Listeners register per event with an integer priority. Higher priorities
//! run first; equal priorities run in registration order. A not-found
//! dispatch ends as soon as a listener stops propagation.
//!
//! ```ignore
//! let mut bus = EventBus::new();
//! bus.subscribe(EventKind::PageNotFound, 1000, listener.clone());
//! bus.subscribe(EventKind::TemplatePaths, 0, listener);
//!
//! let mut event = NotFoundEvent::new(RequestContext::new("/shop/iframe"), &mut pages);
//! bus.dispatch_not_found(&mut event);
//! ```

use crate::{
    engine::RequestContext,
    page::{Page, PageResolver},
};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    PageNotFound,
    TemplatePaths,
}

/// Something that reacts to host events. Both hooks default to no-ops.
pub trait Listener {
    fn on_page_not_found(&self, _event: &mut NotFoundEvent<'_>) {}

    fn on_template_paths(&self, _paths: &mut TemplatePaths) {}
}

/// A request path matched no page.
pub struct NotFoundEvent<'a> {
    pub request: RequestContext,
    pub pages: &'a mut dyn PageResolver,
    /// Page to render instead of the 404, set by the listener that handled it.
    pub page: Option<Page>,
    stopped: bool,
}

impl<'a> NotFoundEvent<'a> {
    pub fn new(request: RequestContext, pages: &'a mut dyn PageResolver) -> Self {
        Self {
            request,
            pages,
            page: None,
            stopped: false,
        }
    }

    pub fn stop_propagation(&mut self) {
        self.stopped = true;
    }

    pub const fn is_stopped(&self) -> bool {
        self.stopped
    }
}

/// Ordered template search path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplatePaths {
    dirs: Vec<PathBuf>,
}

impl TemplatePaths {
    pub fn new(dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            dirs: dirs.into_iter().collect(),
        }
    }

    pub fn push(&mut self, dir: impl Into<PathBuf>) {
        self.dirs.push(dir.into());
    }

    pub fn contains(&self, dir: &Path) -> bool {
        self.dirs.iter().any(|d| d == dir)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }
}

struct Subscription {
    kind: EventKind,
    priority: i32,
    listener: Arc<dyn Listener>,
}

#[derive(Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, kind: EventKind, priority: i32, listener: Arc<dyn Listener>) {
        let subscription = Subscription {
            kind,
            priority,
            listener,
        };
        // Insert after every subscription with priority >= ours: stable order.
        let at = self
            .subscriptions
            .iter()
            .position(|s| s.priority < priority)
            .unwrap_or(self.subscriptions.len());
        self.subscriptions.insert(at, subscription);
    }

    pub fn has_listeners(&self, kind: EventKind) -> bool {
        self.subscriptions.iter().any(|s| s.kind == kind)
    }

    fn listeners(&self, kind: EventKind) -> impl Iterator<Item = &Arc<dyn Listener>> {
        self.subscriptions
            .iter()
            .filter(move |s| s.kind == kind)
            .map(|s| &s.listener)
    }

    pub fn dispatch_not_found(&self, event: &mut NotFoundEvent<'_>) {
        for listener in self.listeners(EventKind::PageNotFound) {
            listener.on_page_not_found(event);
            if event.is_stopped() {
                break;
            }
        }
    }

    pub fn collect_template_paths(&self, paths: &mut TemplatePaths) {
        for listener in self.listeners(EventKind::TemplatePaths) {
            listener.on_template_paths(paths);
        }
    }
}
