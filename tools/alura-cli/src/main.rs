//! Alura CLI - terminal storefront for the Alúra collection.
//!
//! Commands:
//! - `alura products` - List the collection
//! - `alura cart` - Show your bag
//! - `alura add` / `update` / `remove` / `clear` - Change your bag
//! - `alura checkout` - Place an order (simulated)
//! - `alura shell` - Interactive session with live notifications
//! - `alura config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use std::path::PathBuf;

use alura_observability::{init_logging, LogFormat, LogLevel};
use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    AddArgs, CheckoutArgs, ClearArgs, ConfigArgs, ProductsArgs, RemoveArgs, UpdateArgs,
};

/// Alura CLI - Browse the collection, manage your bag and check out
#[derive(Parser)]
#[command(name = "alura")]
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
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the product collection
    Products(ProductsArgs),

    /// Show your bag
    Cart,

    /// Add a product to your bag
    Add(AddArgs),

    /// Change the quantity of a product in your bag
    Update(UpdateArgs),

    /// Remove a product from your bag
    Remove(RemoveArgs),

    /// Empty your bag
    Clear(ClearArgs),

    /// Fill in your details and place the order
    Checkout(CheckoutArgs),

    /// Start an interactive storefront session
    Shell,

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let mut logging = ctx.config.logging.clone();
    if cli.verbose && logging.level > LogLevel::Debug {
        logging = logging.with_level(LogLevel::Debug);
    }
    if cli.json {
        logging = logging.with_format(LogFormat::Json);
    }
    if let Err(e) = init_logging(&logging) {
        ctx.output.warn(&format!("Logging disabled: {}", e));
    }

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Cart => commands::cart::show(&ctx).await,
        Commands::Add(args) => commands::cart::add(args, &ctx).await,
        Commands::Update(args) => commands::cart::update(args, &ctx).await,
        Commands::Remove(args) => commands::cart::remove(args, &ctx).await,
        Commands::Clear(args) => commands::cart::clear(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Shell => commands::shell::run(&ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
