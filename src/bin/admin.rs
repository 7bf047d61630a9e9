//! CLI administration tool for linkmeter.
//!
//! Manages links and reads statistics straight from the database, without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- shorten https://example.com/some/long/path
//!
//! # List the 20 newest links
//! cargo run --bin admin -- list --limit 20
//!
//! # Soft-delete a link
//! cargo run --bin admin -- delete 42
//!
//! # Site-wide or per-link statistics
//! cargo run --bin admin -- stats
//! cargo run --bin admin -- stats --id 42
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! `DATABASE_URL` or the `DB_*` components (see `linkmeter::config`) are
//! required; the in-memory store is useless across processes.

use linkmeter::application::services::{AnalyticsService, ShortenerService};
use linkmeter::config::{self, Config};
use linkmeter::infrastructure::persistence::{PgClickRepository, PgLinkRepository};
use linkmeter::server::connect_database;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing linkmeter.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Shorten a URL (reuses the existing code if already shortened)
    Shorten {
        /// Absolute URL to shorten
        url: String,
    },

    /// List active links, newest first
    List {
        /// Maximum number of links (1-100)
        #[arg(short, long, default_value_t = 20)]
        limit: i64,
    },

    /// Soft-delete a link by id
    Delete {
        /// Link id as shown by `list`
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show statistics
    Stats {
        /// Per-link breakdown for this link id
        #[arg(long)]
        id: Option<i64>,
    },

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
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let database_url = config
        .database_url
        .clone()
        .context("DATABASE_URL (or DB_USER, DB_PASSWORD and DB_NAME) must be set")?;

    let pool = connect_database(&config, &database_url).await?;

    match cli.command {
        Commands::Shorten { url } => shorten(&config, &pool, &url).await?,
        Commands::List { limit } => list_links(&pool, limit).await?,
        Commands::Delete { id, yes } => delete_link(&pool, id, yes).await?,
        Commands::Stats { id } => handle_stats(&pool, id).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn shortener(pool: &PgPool) -> ShortenerService<PgLinkRepository> {
    ShortenerService::new(Arc::new(PgLinkRepository::new(Arc::new(pool.clone()))))
}

/// Shortens a URL and prints the short link.
async fn shorten(config: &Config, pool: &PgPool, url: &str) -> Result<()> {
    let link = shortener(pool)
        .shorten(url)
        .await
        .context("Failed to shorten URL")?;

    let short_url = format!("{}/{}", config.base_url.trim_end_matches('/'), link.short_code);

    println!("{}", "✅ Link ready".green().bold());
    println!();
    println!("  Code:      {}", link.short_code.bright_yellow().bold());
    println!("  Short URL: {}", short_url.cyan());
    println!("  Target:    {}", link.original_url);
    println!("  ID:        {}", link.id.to_string().bright_black());
    println!();

    Ok(())
}

/// Prints active links as a table.
async fn list_links(pool: &PgPool, limit: i64) -> Result<()> {
    let links = shortener(pool).list_all(limit).await?;

    println!("{}", "🔗 Active Links".bright_blue().bold());
    println!();

    if links.is_empty() {
        println!("{}", "  No links yet".yellow());
        println!();
        return Ok(());
    }

    println!(
        "  {:<6} {:<10} {:>7}  {:<20} {}",
        "ID".bold(),
        "CODE".bold(),
        "CLICKS".bold(),
        "CREATED".bold(),
        "URL".bold()
    );

    for item in links {
        println!(
            "  {:<6} {:<10} {:>7}  {:<20} {}",
            item.link.id,
            item.link.short_code.bright_yellow(),
            item.click_count.to_string().bright_green(),
            item.link.created_at.format("%Y-%m-%d %H:%M:%S").to_string().bright_black(),
            item.link.original_url
        );
    }
    println!();

    Ok(())
}

/// Soft-deletes a link after confirmation.
///
/// Clicks recorded for the link are kept and remain visible in `stats --id`.
async fn delete_link(pool: &PgPool, id: i64, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Delete Link".bright_blue().bold());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete link {}?", id))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let deleted = shortener(pool)
        .delete(id)
        .await
        .context("Failed to delete link")?;

    if deleted {
        println!("{}", "✅ Link deleted".green().bold());
    } else {
        println!("{}", format!("⚠️  No link with id {}", id).yellow());
    }
    println!();

    Ok(())
}

/// Displays site-wide statistics or one link's breakdown.
async fn handle_stats(pool: &PgPool, id: Option<i64>) -> Result<()> {
    let pool = Arc::new(pool.clone());
    let analytics = AnalyticsService::new(
        Arc::new(PgClickRepository::new(pool.clone())),
        Arc::new(PgLinkRepository::new(pool)),
    );

    match id {
        None => {
            let stats = analytics.overall_stats().await?;

            println!("{}", "📊 Statistics".bright_blue().bold());
            println!();
            println!(
                "  Active links:  {}",
                stats.total_urls.to_string().bright_green().bold()
            );
            println!(
                "  Total clicks:  {}",
                stats.total_clicks.to_string().bright_green().bold()
            );
            println!(
                "  Clicks today:  {}",
                stats.clicks_today.to_string().bright_green().bold()
            );
            println!();
        }
        Some(id) => {
            let stats = analytics.url_stats(id).await?;

            println!("{}", format!("📊 Statistics for link {}", id).bright_blue().bold());
            println!();
            println!(
                "  Total clicks: {}",
                stats.total_clicks.to_string().bright_green().bold()
            );

            for (title, entries) in [
                ("Browsers", &stats.browsers),
                ("Platforms", &stats.platforms),
                ("Devices", &stats.devices),
            ] {
                println!();
                println!("  {}", title.bright_white().bold());
                for entry in entries {
                    println!("    {:<12} {}", entry.name, entry.count.to_string().cyan());
                }
            }

            if !stats.recent_clicks.is_empty() {
                println!();
                println!("  {}", "Recent clicks".bright_white().bold());
                for click in &stats.recent_clicks {
                    println!(
                        "    {}  {:<8} {:<8} {:<8} {}",
                        click.clicked_at.format("%Y-%m-%d %H:%M:%S").to_string().bright_black(),
                        click.browser,
                        click.platform,
                        click.device,
                        click.referer.as_deref().unwrap_or("-")
                    );
                }
            }
            println!();
        }
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
    }

    Ok(())
}
