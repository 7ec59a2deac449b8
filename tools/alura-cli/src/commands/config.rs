//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let storefront = &ctx.config.storefront;
    let pricing = storefront.pricing();
    let timing = storefront.notification_timing();
    ctx.output.info("[storefront]");
    ctx.output.kv("storage_key", &storefront.storage_key);
    ctx.output.kv(
        "tax_rate",
        &format!("{}.{:02}%", pricing.tax_rate_bps / 100, pricing.tax_rate_bps % 100),
    );
    ctx.output.kv("flat_shipping", &pricing.flat_shipping.display());
    ctx.output.kv("notification_display", &format!("{:?}", timing.display));
    ctx.output.kv("notification_fade", &format!("{:?}", timing.fade));
    ctx.output.kv("checkout_redirect", &format!("{:?}", storefront.checkout_redirect()));
    match &storefront.catalog_path {
        Some(path) => ctx.output.kv("catalog", &ctx.resolve_path(path).display().to_string()),
        None => ctx.output.kv("catalog", "(built-in collection)"),
    }

    ctx.output.info("[storage]");
    ctx.output.kv("backend", &format!("{:?}", ctx.config.storage.backend).to_lowercase());
    ctx.output.kv(
        "dir",
        &ctx.resolve_path(&ctx.config.storage.dir).display().to_string(),
    );

    ctx.output.info("[logging]");
    ctx.output.kv("level", &ctx.config.logging.level.to_string());
    ctx.output.kv("format", &format!("{:?}", ctx.config.logging.format).to_lowercase());
    if let Some(filter) = &ctx.config.logging.filter {
        ctx.output.kv("filter", filter);
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("alura.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
