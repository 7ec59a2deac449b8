//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod products;
pub mod shell;

use clap::{Args, Subcommand};

/// Most units a single `add` accepts.
pub const MAX_ADD_QUANTITY: u32 = 999;

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Only show products in this category.
    #[arg(short, long)]
    pub category: Option<String>,
}

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product ID.
    pub id: u32,

    /// Number of units to add.
    #[arg(
        short,
        long,
        default_value = "1",
        value_parser = clap::value_parser!(u32).range(1..=MAX_ADD_QUANTITY as i64)
    )]
    pub quantity: u32,
}

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// Product ID.
    pub id: u32,

    /// Quantity change, e.g. 2 or -1. A line that drops to zero is removed.
    #[arg(allow_negative_numbers = true)]
    pub delta: i64,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Product ID.
    pub id: u32,
}

/// Arguments for the clear command.
#[derive(Args)]
pub struct ClearArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Form field as name=value (e.g. --field email=jane@example.com).
    #[arg(short, long = "field", value_name = "NAME=VALUE")]
    pub fields: Vec<String>,

    /// Don't prompt; fail if a field is missing.
    #[arg(long)]
    pub no_input: bool,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
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
}

/// Split a `name=value` argument.
pub fn parse_field(arg: &str) -> anyhow::Result<(&str, &str)> {
    match arg.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value)),
        _ => anyhow::bail!("Expected NAME=VALUE, got '{}'", arg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct AddCli {
        #[command(flatten)]
        add: AddArgs,
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(parse_field("email=a@b.c").unwrap(), ("email", "a@b.c"));
        assert_eq!(parse_field("street=1 Main St").unwrap(), ("street", "1 Main St"));
        assert_eq!(parse_field("cvv=").unwrap(), ("cvv", ""));
        assert!(parse_field("email").is_err());
        assert!(parse_field("=value").is_err());
    }

    #[test]
    fn test_add_quantity_bounds() {
        let parsed = AddCli::try_parse_from(["add", "101"]).unwrap();
        assert_eq!(parsed.add.quantity, 1);

        let parsed = AddCli::try_parse_from(["add", "101", "-q", "999"]).unwrap();
        assert_eq!(parsed.add.quantity, 999);

        assert!(AddCli::try_parse_from(["add", "101", "-q", "0"]).is_err());
        assert!(AddCli::try_parse_from(["add", "101", "-q", "1000"]).is_err());
        assert!(AddCli::try_parse_from(["add", "101", "-q", "4000000000"]).is_err());
    }
}
