//! Request context: the unresolved path and the pieces derived from it.

/// An unresolved request path.
///
/// `basename` is the last segment and `parent()` the directory, both with
/// POSIX `basename`/`dirname` semantics so they agree with the host's own
/// path handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    path: String,
    basename: String,
}

impl RequestContext {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let basename = basename(&path).to_owned();
        Self { path, basename }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn basename(&self) -> &str {
        &self.basename
    }

    /// Route of the page that would own this path.
    pub fn parent(&self) -> String {
        dirname(&self.path)
    }
}

/// Last path segment, ignoring trailing slashes.
///
/// | input        | output    |
/// |--------------|-----------|
/// | `/a/b/iframe`| `iframe`  |
/// | `/a/b/`      | `b`       |
/// | `/`          | (empty)   |
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(index) => &trimmed[index + 1..],
        None => trimmed,
    }
}

/// Directory part of a path, ignoring trailing slashes.
///
/// | input        | output |
/// |--------------|--------|
/// | `/a/b/iframe`| `/a/b` |
/// | `/iframe`    | `/`    |
/// | `iframe`     | `.`    |
/// | `/`          | `/`    |
pub fn dirname(path: &str) -> String {
    if path.is_empty() {
        return ".".into();
    }

    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".into();
    }

    match trimmed.rfind('/') {
        None => ".".into(),
        Some(index) => {
            let parent = trimmed[..index].trim_end_matches('/');
            if parent.is_empty() {
                "/".into()
            } else {
                parent.into()
            }
        }
    }
}
