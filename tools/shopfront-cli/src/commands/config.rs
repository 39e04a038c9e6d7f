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
        ConfigCommand::Init { name, force } => init_config(name, force, ctx),
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
        None => ctx.output.warn("No config file found; using defaults"),
    }

    let config = &ctx.config;

    ctx.output.info("[store]");
    ctx.output.kv("name", &config.store.name);
    ctx.output.kv("whatsapp_number", &config.store.whatsapp_number);

    ctx.output.info("[storage]");
    ctx.output.kv("dir", &ctx.storage_dir().display().to_string());
    ctx.output.kv("cart_key", &config.storage.cart_key);

    ctx.output.info("[catalog]");
    match &config.catalog.path {
        Some(path) => ctx.output.kv("path", &path.display().to_string()),
        None => ctx.output.kv("path", "(bundled)"),
    }

    ctx.output.info("[postal]");
    ctx.output.kv("base_url", &config.postal.base_url);

    ctx.output.info("[shipping]");
    for (name, rate) in [("pac", &config.shipping.pac), ("sedex", &config.shipping.sedex)] {
        ctx.output.kv(
            name,
            &format!("{} ({}-{} dias)", rate.price.display(), rate.min_days, rate.max_days),
        );
    }

    if !config.coupons.is_empty() {
        ctx.output.info("[[coupons]]");
        for coupon in &config.coupons {
            let state = if coupon.active { "" } else { " (inativo)" };
            ctx.output.list_item(&format!("{}{}", coupon.label(), state));
        }
    }

    if let Some(customer) = &config.customer {
        ctx.output.info("[customer]");
        ctx.output.kv("name", &customer.name);
        ctx.output.kv("email", &customer.email);
    }

    Ok(())
}

fn init_config(name: Option<String>, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("shopfront.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let name = name.unwrap_or_else(|| ctx.config.store.name.clone());
    let content = generate_default_config(&name);
    fs::write(&config_path, content)?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
