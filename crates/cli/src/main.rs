//! Elegant CLI - Database migrations, seeding and admin accounts.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! elegant-cli migrate
//!
//! # Load the demo catalog and test accounts
//! elegant-cli seed
//!
//! # Replace all catalog data with a custom file
//! elegant-cli seed --file catalog.yaml --reset
//!
//! # Create an admin user
//! elegant-cli admin create -e admin@example.com -p 's3cret-pass' --first-name Noura
//!
//! # Promote an existing account
//! elegant-cli admin promote -e customer@example.com
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed categories, products and accounts from YAML
//! - `admin create` / `admin promote` - Manage admin accounts

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "elegant-cli")]
#[command(author, version, about = "Elegant storefront CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database from a YAML file
    Seed {
        /// Seed file (defaults to the bundled demo catalog)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Delete existing categories, products, carts and orders first
        #[arg(long)]
        reset: bool,
    },
    /// Manage admin users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin user
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Initial password
        #[arg(short, long)]
        password: String,

        /// First name
        #[arg(long, default_value = "Admin")]
        first_name: String,

        /// Last name
        #[arg(long, default_value = "")]
        last_name: String,
    },
    /// Give an existing account the admin role
    Promote {
        /// Account email address
        #[arg(short, long)]
        email: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { file, reset } => {
            commands::seed::run(file.as_deref(), reset).await?;
        }
        Commands::Admin { action } => match action {
            AdminAction::Create {
                email,
                password,
                first_name,
                last_name,
            } => {
                commands::admin::create_user(&email, &password, &first_name, &last_name).await?;
            }
            AdminAction::Promote { email } => {
                commands::admin::promote(&email).await?;
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_seed_flags() {
        let cli = Cli::try_parse_from(["elegant-cli", "seed", "--reset", "-f", "x.yaml"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Seed { reset: true, file: Some(_) })
        ));
    }

    #[test]
    fn test_admin_create_requires_password() {
        assert!(Cli::try_parse_from(["elegant-cli", "admin", "create", "-e", "a@b.sa"]).is_err());
    }
}
