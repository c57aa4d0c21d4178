//! `[serve]` section configuration.
//!
//! Contains development server settings.

use super::{ConfigError, defaults};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

/// `[serve]` section in iframe.toml - development server settings.
///
/// # Example
/// ```toml
/// [serve]
/// interface = "0.0.0.0"
/// port = 8080
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ServeConfig {
    /// Network interface to bind.
    /// - `127.0.0.1` (default): localhost only
    /// - `0.0.0.0`: all interfaces (LAN accessible)
    #[serde(default = "defaults::serve::interface")]
    #[educe(Default = defaults::serve::interface())]
    pub interface: String,

    /// HTTP port number (default: 5280).
    #[serde(default = "defaults::serve::port")]
    #[educe(Default = defaults::serve::port())]
    pub port: u16,
}

impl ServeConfig {
    /// First address the dev server tries to bind.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.interface.parse().map_err(|_| {
            ConfigError::Validation(format!(
                "[serve.interface] `{}` is not an IP address",
                self.interface
            ))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::net::SocketAddr;

    #[test]
    fn test_default_addr() {
        let config = SiteConfig::from_str("").unwrap();
        let expected: SocketAddr = "127.0.0.1:5280".parse().unwrap();

        assert_eq!(config.serve.socket_addr().unwrap(), expected);
    }

    #[test]
    fn test_lan_addr() {
        let config = SiteConfig::from_str(
            r#"
            [serve]
            interface = "0.0.0.0"
        "#,
        )
        .unwrap();

        assert_eq!(config.serve.port, 5280);
        assert!(config.serve.socket_addr().unwrap().ip().is_unspecified());
    }

    #[test]
    fn test_ipv6_interface() {
        let config = SiteConfig::from_str(
            r#"
            [serve]
            interface = "::1"
            port = 8080
        "#,
        )
        .unwrap();

        let addr = config.serve.socket_addr().unwrap();
        assert!(addr.is_ipv6());
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_hostname_interface_is_rejected() {
        let config = SiteConfig::from_str(
            r#"
            [serve]
            interface = "localhost"
        "#,
        )
        .unwrap();

        let err = config.serve.socket_addr().unwrap_err();
        assert!(err.to_string().contains("[serve.interface]"));
    }

    #[test]
    fn test_port_out_of_range() {
        assert!(SiteConfig::from_str("[serve]\nport = 70000").is_err());
    }
}
