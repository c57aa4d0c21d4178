//! Iframe override: render a parent page with an alternate template when a
//! trigger slug below it would otherwise 404.
//!
//! The decision itself lives in [`engine`]. Everything else is a small host
//! around it: configuration, a content tree, an event bus, template lookup
//! and a development server.

pub mod cli;
pub mod config;
pub mod content;
pub mod engine;
pub mod events;
pub mod host;
pub mod logger;
pub mod page;
pub mod plugin;
pub mod render;
pub mod serve;
