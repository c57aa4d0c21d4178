//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

// ============================================================================
// [site] Section Defaults
// ============================================================================

pub mod site {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn content() -> PathBuf {
        "content".into()
    }

    pub fn templates() -> PathBuf {
        "templates".into()
    }

    pub fn admin_route() -> Option<String> {
        None
    }
}

// ============================================================================
// [iframe] Section Defaults
// ============================================================================

pub mod iframe {
    use std::path::PathBuf;

    pub fn slug() -> String {
        "iframe".into()
    }

    pub fn template() -> String {
        "iframe/default".into()
    }

    pub fn templates() -> PathBuf {
        "plugins/iframe/templates".into()
    }

    pub fn enable_on_routes() -> Vec<String> {
        vec!["/".into()]
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        5280
    }
}
