//! Mobistore CLI - a terminal storefront for mobile phones.
//!
//! Commands:
//! - `mobistore product` - Show a product
//! - `mobistore cart` - Show the cart
//! - `mobistore add` / `update` / `remove` - Edit the cart
//! - `mobistore checkout` - Place an order
//! - `mobistore login` / `logout` - Manage the session
//! - `mobistore route` - Resolve a storefront path
//! - `mobistore config` - Manage configuration

mod cart_file;
mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AddArgs, ConfigArgs, LoginArgs, ProductArgs, RemoveArgs, RouteArgs, UpdateArgs};

/// Mobistore CLI - browse, fill and check out a phone cart
#[derive(Parser)]
#[command(name = "mobistore")]
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
    /// Show a product's details page
    Product(ProductArgs),

    /// Show the cart with prices and total
    Cart,

    /// Add a product to the cart
    Add(AddArgs),

    /// Change the quantity of a cart item
    Update(UpdateArgs),

    /// Remove a product from the cart
    Remove(RemoveArgs),

    /// Place an order for the cart
    Checkout,

    /// Log in
    Login(LoginArgs),

    /// Log out
    Logout,

    /// Resolve a storefront path
    Route(RouteArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Product(args) => commands::product::run(args, &ctx).await,
        Commands::Cart => commands::cart::show(&ctx).await,
        Commands::Add(args) => commands::cart::add(args, &ctx).await,
        Commands::Update(args) => commands::cart::update(args, &ctx).await,
        Commands::Remove(args) => commands::cart::remove(args, &ctx).await,
        Commands::Checkout => commands::checkout::run(&ctx).await,
        Commands::Login(args) => commands::session::login(args, &ctx).await,
        Commands::Logout => commands::session::logout(&ctx).await,
        Commands::Route(args) => commands::route::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` overrides the level picked by `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
