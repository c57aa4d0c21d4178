//! Iframe override decision engine.
//!
//! Two independent checks:
//!
//! - [`RouteGate`]: computed once per activation from the request path and
//!   the route filters; decides whether the plugin subscribes at all.
//! - [`NotFoundHandler`]: per not-found event, decides whether the parent page
//!   is rendered with the override template instead of a 404.

mod handler;
mod merge;
mod request;
mod route;

pub use handler::{Decision, DeclineReason, NotFoundHandler, header_value};
pub use merge::{HEADER_KEY, MergedConfig, PageOverride, PageSettings};
pub use request::{RequestContext, basename, dirname};
pub use route::{RouteGate, is_route_enabled};
