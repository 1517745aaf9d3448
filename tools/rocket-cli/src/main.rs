//! RocketCart CLI - Command line front end for the cart store.
//!
//! Commands:
//! - `rocketcart show` - Print the cart
//! - `rocketcart add` - Add one unit of a product
//! - `rocketcart remove` - Remove a product's line
//! - `rocketcart update` - Set a product's quantity
//! - `rocketcart config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AddArgs, ConfigArgs, RemoveArgs, UpdateArgs};

/// RocketCart CLI - Manage a shopper's cart against live stock
#[derive(Parser)]
#[command(name = "rocketcart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart contents
    Show,

    /// Add one unit of a product to the cart
    Add(AddArgs),

    /// Remove a product from the cart
    Remove(RemoveArgs),

    /// Set the quantity of a product already in the cart
    Update(UpdateArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Show => commands::cart::show(&ctx).await,
        Commands::Add(args) => commands::cart::add(args, &ctx).await,
        Commands::Remove(args) => commands::cart::remove(args, &ctx).await,
        Commands::Update(args) => commands::cart::update(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await.map(|()| true),
    };

    match result {
        Ok(true) => Ok(()),
        // The toast has already been shown.
        Ok(false) => std::process::exit(1),
        Err(e) => {
            ctx.output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    }
}
