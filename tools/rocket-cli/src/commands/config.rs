//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::{Context, CONFIG_NAMES};

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

    let cart = &ctx.config.cart;
    ctx.output.header("Current Configuration");

    ctx.output.info("[cart]");
    ctx.output.kv("storage_key", &cart.storage_key);
    ctx.output.kv("api.base_url", &cart.api.base_url);

    ctx.output.info("[cart.messages]");
    ctx.output.kv("out_of_stock", &cart.messages.out_of_stock);
    ctx.output.kv("add_failed", &cart.messages.add_failed);
    ctx.output.kv("remove_failed", &cart.messages.remove_failed);
    ctx.output.kv("update_failed", &cart.messages.update_failed);

    ctx.output.info("[storage]");
    ctx.output.kv("path", &ctx.config.storage.path);

    ctx.output.info("[catalog]");
    ctx.output.kv(
        "fixture",
        ctx.config.catalog.fixture.as_deref().unwrap_or("(none)"),
    );

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.cwd.join(CONFIG_NAMES[0]);

    if path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            path.display()
        );
    }

    fs::write(&path, generate_default_config())?;
    ctx.output
        .success(&format!("Created config file: {}", path.display()));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use crate::output::Output;

    fn context_in(dir: &std::path::Path) -> Context {
        Context {
            config: CliConfig::default(),
            output: Output::new(false, true),
            cwd: dir.to_path_buf(),
        }
    }

    #[test]
    fn test_init_writes_loadable_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path());

        init_config(false, &ctx).unwrap();

        let path = dir.path().join("rocketcart.toml");
        let config = CliConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_init_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path());
        let path = dir.path().join("rocketcart.toml");
        fs::write(&path, "# mine\n").unwrap();

        assert!(init_config(false, &ctx).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "# mine\n");

        init_config(true, &ctx).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), generate_default_config());
    }
}
