//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Render a parent page with an iframe template when its trigger slug 404s
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Config file name (default: iframe.toml)
    #[arg(short = 'C', long, default_value = "iframe.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show what happens when a request path is not found
    Check {
        /// Request path, e.g. `/shop/iframe`
        path: String,

        /// Treat the request as an admin request
        #[arg(long)]
        admin: bool,
    },

    /// List every page and listing node in the content tree
    Pages,

    /// Serve the site, answering unknown paths through the override plugin
    Serve {
        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port you should provide
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from(["iframe-override", "check", "/shop/iframe", "--admin"]).unwrap();

        assert_eq!(cli.config, PathBuf::from("iframe.toml"));
        match cli.command {
            Commands::Check { path, admin } => {
                assert_eq!(path, "/shop/iframe");
                assert!(admin);
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from([
            "iframe-override",
            "-r",
            "site",
            "-C",
            "other.toml",
            "serve",
            "--port",
            "8080",
        ])
        .unwrap();

        assert_eq!(cli.root, Some(PathBuf::from("site")));
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        match cli.command {
            Commands::Serve { interface, port } => {
                assert_eq!(interface, None);
                assert_eq!(port, Some(8080));
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_check_requires_path() {
        assert!(Cli::try_parse_from(["iframe-override", "check"]).is_err());
    }
}
