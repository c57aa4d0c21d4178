//! iframe-override - answer trigger-slug 404s with the parent page.

use anyhow::{Result, bail};
use clap::Parser;
use iframe_override::{
    cli::{Cli, Commands},
    config::SiteConfig,
    engine::Decision,
    host::{Check, Site},
    log,
    serve::serve_site,
};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let site = Site::load(&config)?;

    match &cli.command {
        Commands::Check { path, admin } => {
            check_path(&site, path, *admin);
            Ok(())
        }
        Commands::Pages => {
            list_pages(&site);
            Ok(())
        }
        Commands::Serve { .. } => serve_site(&config, &site),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else if cli.config != Path::new("iframe.toml") {
        bail!("Config file `{}` not found.", config_path.display());
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}

/// Print what a not-found request for `path` would produce.
fn check_path(site: &Site, path: &str, admin: bool) {
    match site.check(path, admin) {
        check @ Check::Decided(Decision::Override(_)) => log!("iframe"; "{path}: {check}"),
        check @ Check::Found => log!("check"; "{path}: {check}"),
        check => log!("decline"; "{path}: {check}"),
    }
}

fn list_pages(site: &Site) {
    for page in site.pages().iter() {
        let kind = match (page.is_page, page.published) {
            (false, _) => "listing",
            (true, false) => "unpublished",
            (true, true) => "page",
        };
        log!("pages"; "{:<32} {:<12} {}", page.route, kind, page.template);
    }
}
