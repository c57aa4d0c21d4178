//! Route activation gate.
//!
//! Decides once per activation whether the plugin listens at all for the
//! current request path. The result is an immutable value handed to
//! whoever needs it.

/// Result of matching a request path against the route filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteGate {
    open: bool,
}

impl RouteGate {
    /// A gate that never lets the plugin activate.
    pub const CLOSED: Self = Self { open: false };

    /// Evaluate the filters for `path`.
    ///
    /// `disable_on_routes` wins over everything and matches exactly.
    /// `enable_on_routes` matches exactly or as a plain string prefix, so
    /// `/foo` also enables `/foobar`.
    pub fn compute<S: AsRef<str>>(
        path: &str,
        enable_on_routes: &[S],
        disable_on_routes: &[S],
    ) -> Self {
        Self {
            open: is_route_enabled(path, enable_on_routes, disable_on_routes),
        }
    }

    pub const fn is_open(self) -> bool {
        self.open
    }
}

/// See [`RouteGate::compute`].
pub fn is_route_enabled<S: AsRef<str>>(
    path: &str,
    enable_on_routes: &[S],
    disable_on_routes: &[S],
) -> bool {
    if disable_on_routes.iter().any(|route| route.as_ref() == path) {
        return false;
    }

    enable_on_routes.iter().any(|route| {
        let route = route.as_ref();
        route == path || path.starts_with(route)
    })
}
