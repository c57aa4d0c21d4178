//! The iframe override plugin as the host sees it.
//!
//! # Lifecycle
//!
//! ```text
//! activation (per request)
//!     │
//!     ├── enabled = false or admin request ──► no subscriptions
//!     │
//!     └── RouteGate::compute(request path)
//!             │
//!             ├── closed ──► no subscriptions
//!             │
//!             └── open ──► PageNotFound  @ 1000 ──► NotFoundHandler::handle
//!                          TemplatePaths @ 0    ──► append templates dir
//! ```

use crate::{
    config::IframeConfig,
    engine::{Decision, NotFoundHandler, RouteGate},
    events::{EventBus, EventKind, Listener, NotFoundEvent, TemplatePaths},
};
use std::{path::PathBuf, sync::Arc};

/// Priority of the not-found subscription. Runs ahead of default handlers.
pub const NOT_FOUND_PRIORITY: i32 = 1000;
/// Priority of the template path subscription.
pub const TEMPLATE_PATHS_PRIORITY: i32 = 0;

#[derive(Debug, Clone)]
pub struct IframePlugin {
    handler: NotFoundHandler,
    templates: PathBuf,
}

impl IframePlugin {
    pub fn new(config: Arc<IframeConfig>) -> Self {
        Self {
            templates: config.templates.clone(),
            handler: NotFoundHandler::new(config),
        }
    }

    pub fn handler(&self) -> &NotFoundHandler {
        &self.handler
    }

    /// Route gate for this activation.
    ///
    /// Closed when the plugin is disabled or the request is an admin request,
    /// otherwise decided by the route filters.
    pub fn gate(&self, request_path: &str, is_admin: bool) -> RouteGate {
        let config = self.handler.config();
        if !config.enabled || is_admin {
            return RouteGate::CLOSED;
        }
        RouteGate::compute(
            request_path,
            &config.enable_on_routes,
            &config.disable_on_routes,
        )
    }

    /// Subscribe to the host events if the gate for `request_path` is open.
    ///
    /// Returns whether anything was subscribed.
    pub fn register(
        self: &Arc<Self>,
        bus: &mut EventBus,
        request_path: &str,
        is_admin: bool,
    ) -> bool {
        if !self.gate(request_path, is_admin).is_open() {
            return false;
        }

        let listener: Arc<dyn Listener> = Arc::clone(self) as Arc<dyn Listener>;
        bus.subscribe(EventKind::PageNotFound, NOT_FOUND_PRIORITY, Arc::clone(&listener));
        bus.subscribe(EventKind::TemplatePaths, TEMPLATE_PATHS_PRIORITY, listener);
        true
    }
}

impl Listener for IframePlugin {
    fn on_page_not_found(&self, event: &mut NotFoundEvent<'_>) {
        if let Decision::Override(_) = self.handler.handle(&event.request, &mut *event.pages) {
            event.page = event.pages.find_mut(&event.request.parent()).cloned();
            event.stop_propagation();
        }
    }

    fn on_template_paths(&self, paths: &mut TemplatePaths) {
        if !paths.contains(&self.templates) {
            paths.push(self.templates.clone());
        }
    }
}
