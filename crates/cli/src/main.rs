//! Verdant CLI - browse the plant catalog from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # List categories
//! verdant categories
//!
//! # List plants in category 1 from a local catalog
//! verdant --api-url http://127.0.0.1:9000/api plants --category 1
//!
//! # Show one plant
//! verdant plant 3
//! ```
//!
//! # Commands
//!
//! - `categories` - List categories
//! - `plants` - List plants, optionally by category
//! - `plant` - Show one plant

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "verdant")]
#[command(author, version, about = "Verdant plant catalog tools")]
struct Cli {
    /// Catalog API base URL (defaults to `CATALOG_API_URL` or the public API)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List categories
    Categories,
    /// List plants
    Plants {
        /// Only list plants in this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show one plant
    Plant {
        /// Plant ID
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "verdant_cli=info,verdant_storefront=warn".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::catalog::CommandError> {
    let client = commands::catalog::client(cli.api_url.as_deref())?;

    match cli.command {
        Commands::Categories => {
            let count = commands::catalog::categories(&client).await?;
            tracing::debug!(count, "Listed categories");
        }
        Commands::Plants { category } => {
            let count = commands::catalog::plants(&client, category.as_deref()).await?;
            tracing::debug!(count, "Listed plants");
        }
        Commands::Plant { id } => commands::catalog::plant(&client, &id).await?,
    }

    Ok(())
}
