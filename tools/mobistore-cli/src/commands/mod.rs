//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod product;
pub mod route;
pub mod session;

use clap::{Args, Subcommand};

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product ID.
    pub id: String,

    /// Units to add.
    #[arg(short, long, default_value = "1")]
    pub quantity: i64,

    /// Skip checking that the product exists.
    #[arg(long)]
    pub offline: bool,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product ID.
    pub id: String,
}

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// Product ID.
    pub id: String,

    /// New quantity.
    pub quantity: i64,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Product ID.
    pub id: String,
}

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// User name.
    pub user: String,

    /// Page to continue at after logging in.
    #[arg(short, long)]
    pub return_url: Option<String>,
}

/// Arguments for the route command.
#[derive(Args)]
pub struct RouteArgs {
    /// Path to resolve, e.g. `/mobile/m1` or `/login?returnUrl=/cart`.
    pub path: String,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
