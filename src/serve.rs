//! Development server.
//!
//! A lightweight HTTP server built on `tiny_http`:
//!
//! - Published pages are rendered with their own template
//! - Unknown paths raise a not-found event; the iframe plugin may answer it
//!   with the parent page rendered through the override template
//! - Everything else is a plain 404
//! - Graceful shutdown on Ctrl+C
//!
//! Requests are handled sequentially on the main thread.

use crate::{
    config::SiteConfig,
    host::{Outcome, Site},
    log,
};
use anyhow::{Context, Result};
use std::{
    io::Cursor,
    net::{IpAddr, SocketAddr},
    sync::Arc,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

// ============================================================================
// Server Entry Point
// ============================================================================

/// Start the development server.
///
/// This function:
/// 1. Binds to the configured interface and port (with auto-retry on port conflict)
/// 2. Sets up Ctrl+C handler for graceful shutdown
/// 3. Enters the main request handling loop
///
/// The server blocks until Ctrl+C is received.
pub fn serve_site(config: &SiteConfig, site: &Site) -> Result<()> {
    let base = config.serve.socket_addr()?;
    let (server, addr) = try_bind_port(base.ip(), base.port(), MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{} ({} pages)", addr, site.pages().len());

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, site) {
            log!("error"; "request error: {e:#}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(interface: IpAddr, base_port: u16, max_retries: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;

    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow::anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        max_retries,
        base_port,
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

// ============================================================================
// Request Handling
// ============================================================================

/// Handle a single HTTP request.
fn handle_request(request: Request, site: &Site) -> Result<()> {
    let path = request_path(request.url());

    match site.respond(&path)? {
        Outcome::Page(html) => serve_html(request, html, StatusCode(200)),
        Outcome::Override {
            route,
            template,
            html,
        } => {
            log!("iframe"; "{path} -> {route} ({template})");
            serve_html(request, html, StatusCode(200))
        }
        Outcome::NotFound => serve_not_found(request),
    }
}

/// URL path without query string, percent-decoded.
fn request_path(url: &str) -> String {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    let decoded = urlencoding::decode(without_query)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_else(|_| without_query.to_owned());
    if decoded.is_empty() {
        "/".into()
    } else {
        decoded
    }
}

// ============================================================================
// Response Helpers
// ============================================================================

fn content_type(value: &str) -> Result<Header> {
    Header::from_bytes("Content-Type", value)
        .map_err(|()| anyhow::anyhow!("Invalid Content-Type header `{value}`"))
}

/// Serve HTML content.
fn serve_html(request: Request, content: String, status: StatusCode) -> Result<()> {
    let response = Response::from_string(content)
        .with_status_code(status)
        .with_header(content_type("text/html; charset=utf-8")?);
    request.respond(response)?;
    Ok(())
}

/// Serve 404 Not Found response.
fn serve_not_found(request: Request) -> Result<()> {
    let body = "404 Not Found";
    let response = Response::new(
        StatusCode(404),
        vec![content_type("text/plain")?],
        Cursor::new(body),
        Some(body.len()),
        None,
    );
    request.respond(response)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_path_strips_query() {
        assert_eq!(request_path("/shop/iframe?t=123"), "/shop/iframe");
        assert_eq!(request_path("/shop/iframe#top"), "/shop/iframe");
    }

    #[test]
    fn test_request_path_decodes() {
        assert_eq!(request_path("/caf%C3%A9/iframe"), "/café/iframe");
    }

    #[test]
    fn test_request_path_empty() {
        assert_eq!(request_path(""), "/");
        assert_eq!(request_path("?x=1"), "/");
    }

    #[test]
    fn test_content_type_header() {
        assert!(content_type("text/html; charset=utf-8").is_ok());
    }
}
