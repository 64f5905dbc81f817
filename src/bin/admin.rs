//! CLI administration tool for short-url.
//!
//! Works directly against the PostgreSQL store, without requiring the HTTP
//! server to be running.
//!
//! # Usage
//!
//! ```bash
//! # Create a short URL
//! cargo run --bin admin -- shorten http://google.com
//!
//! # Look up a slug
//! cargo run --bin admin -- resolve aZ3kP9q
//!
//! # Count stored mappings
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Reads the same variables as the server. `DATABASE_URL` (or the `DB_*`
//! components) is required; `BASE_URL`, `SLUG_LENGTH` and `SLUG_MAX_ATTEMPTS`
//! are honored when set.

use short_url::config::Config;
use short_url::domain::entities::CreateShortUrlParams;
use short_url::domain::repositories::ShortUrlStore;
use short_url::domain::slug::SlugAllocator;
use short_url::infrastructure::persistence::{PgShortUrlStore, pg_store};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::process::ExitCode;
use std::sync::Arc;

/// CLI tool for managing short-url.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Create a short URL for a destination
    Shorten {
        /// Destination to redirect to (e.g., "https://example.com/page")
        destination: String,
    },

    /// Show the destination stored under a slug
    Resolve {
        /// Slug to look up
        slug: String,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let pool = pg_store::connect(&config.pg_settings()?)
        .await
        .context("Failed to connect to database")?;

    let allocator = SlugAllocator::random(config.slug_length, config.slug_max_attempts)?;
    let store = PgShortUrlStore::new(Arc::new(pool.clone()), allocator);

    match cli.command {
        Commands::Shorten { destination } => {
            shorten(&store, destination, config.base_url.as_deref()).await?
        }
        Commands::Resolve { slug } => return resolve(&store, &slug).await,
        Commands::Stats => handle_stats(&store).await?,
        Commands::Db { action } => handle_db_action(action, &store, &pool).await?,
    }

    Ok(ExitCode::SUCCESS)
}

/// Creates a short URL and prints its public form.
async fn shorten(store: &PgShortUrlStore, destination: String, base_url: Option<&str>) -> Result<()> {
    println!("{}", "✂️  Shorten URL".bright_blue().bold());
    println!();

    let short_url = store
        .create_short_url(CreateShortUrlParams::new(destination))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create short URL: {}", e))?;

    println!("  Slug:        {}", short_url.slug.bright_yellow().bold());
    println!("  Destination: {}", short_url.destination.cyan());
    println!(
        "  Short URL:   {}",
        short_url.short_url(base_url).bright_green().bold()
    );
    println!();

    Ok(())
}

/// Prints the mapping stored under `slug`.
///
/// Exits with status 1 when the slug is unknown.
async fn resolve(store: &PgShortUrlStore, slug: &str) -> Result<ExitCode> {
    let short_url = store
        .get_short_url_by_slug(slug)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    let Some(short_url) = short_url else {
        println!("{} {}", "❌ Not found:".red(), slug.bright_white());
        return Ok(ExitCode::FAILURE);
    };

    println!("  Slug:        {}", short_url.slug.bright_yellow());
    println!("  Destination: {}", short_url.destination.cyan());
    println!(
        "  Created:     {}",
        short_url
            .created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );

    Ok(ExitCode::SUCCESS)
}

/// Displays the number of stored short URLs.
async fn handle_stats(store: &PgShortUrlStore) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let count = store
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    println!(
        "  Short URLs: {}",
        count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, store: &PgShortUrlStore, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            store
                .ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
