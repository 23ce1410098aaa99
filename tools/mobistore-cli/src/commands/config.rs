//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let config = &ctx.config;

    ctx.output.info("[catalog]");
    if let Some(ref url) = config.catalog.base_url {
        ctx.output.kv("base_url", url);
    }
    if let Some(ref file) = config.catalog.catalog_file {
        ctx.output.kv("catalog_file", file);
    }
    ctx.output.kv("timeout_ms", &config.catalog.timeout_ms.to_string());

    ctx.output.info("[cart]");
    ctx.output.kv("currency", &config.cart.currency);
    ctx.output.kv("items_file", &config.cart.items_file);
    ctx.output.kv("hydration", &format!("{:?}", config.cart.hydration));
    ctx.output
        .kv("on_lookup_error", &format!("{:?}", config.cart.on_lookup_error));

    ctx.output.info("[session]");
    ctx.output.kv("file", &config.session.file);
    ctx.output
        .kv("lifetime_secs", &config.session.lifetime_secs.to_string());

    if !config.routes.guarded.is_empty() {
        ctx.output.info("Guarded routes:");
        for kind in &config.routes.guarded {
            ctx.output.list_item(kind.pattern());
        }
    }

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = ctx.config.check();

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
