//! CLI administration tool for contacts-api.
//!
//! Provides commands for inspecting and maintaining the contact store
//! without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # List favorite contacts whose name contains "ann"
//! cargo run --bin admin -- contacts list --favorite --name ann
//!
//! # Delete every contact and avatar (asks for confirmation)
//! cargo run --bin admin -- contacts purge
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DB_*`), optional `REDIS_URL`,
//! and `PUBLIC_DIR` for avatar files.

use contacts_api::application::services::ContactService;
use contacts_api::config::{self, Config, UPLOADS_PUBLIC_PATH};
use contacts_api::domain::repositories::{ContactFilter, ContactRepository};
use contacts_api::infrastructure::cache::{CacheService, NullCache, RedisCache};
use contacts_api::infrastructure::persistence::PgContactRepository;
use contacts_api::infrastructure::storage::LocalAvatarStorage;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing contacts-api.
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
    /// Manage contacts
    Contacts {
        #[command(subcommand)]
        action: ContactsAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Contact management subcommands.
#[derive(Subcommand)]
enum ContactsAction {
    /// List contacts
    List {
        /// Only favorites
        #[arg(short, long)]
        favorite: bool,

        /// Case-insensitive name substring
        #[arg(short, long)]
        name: Option<String>,

        /// Maximum number of contacts to show
        #[arg(short, long, default_value_t = 20)]
        limit: i64,
    },

    /// Delete every contact and its avatar
    Purge {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
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
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;

    let pool = PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Contacts { action } => handle_contacts_action(action, &pool, &config).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches contact management commands.
async fn handle_contacts_action(
    action: ContactsAction,
    pool: &PgPool,
    config: &Config,
) -> Result<()> {
    let repo = Arc::new(PgContactRepository::new(Arc::new(pool.clone())));

    match action {
        ContactsAction::List {
            favorite,
            name,
            limit,
        } => {
            let filter = ContactFilter::new()
                .with_favorite(favorite.then_some(true))
                .with_name(name);
            list_contacts(repo, filter, limit).await?;
        }
        ContactsAction::Purge { yes } => {
            purge_contacts(repo, config, yes).await?;
        }
    }

    Ok(())
}

/// Lists contacts as a table.
///
/// # Output Format
///
/// ```text
/// 📋 Contacts
///
///   ID    Name                      Email                          Phone                Fav
///   ──────────────────────────────────────────────────────────────────────────────────────
///   1     Alice                     alice@example.com              +1 555 0100          ★
/// ```
async fn list_contacts(
    repo: Arc<PgContactRepository>,
    filter: ContactFilter,
    limit: i64,
) -> Result<()> {
    println!("{}", "📋 Contacts".bright_blue().bold());
    println!();

    let (contacts, total) = tokio::try_join!(
        repo.list(filter.clone(), 0, limit.max(1)),
        repo.count(filter)
    )
    .map_err(|e| anyhow::anyhow!("Failed to list contacts: {}", e))?;

    if contacts.is_empty() {
        println!("{}", "  No contacts found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<25} {:<30} {:<20} {}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Email".bright_white().bold(),
        "Phone".bright_white().bold(),
        "Fav".bright_white().bold()
    );
    println!("  {}", "─".repeat(86).bright_black());

    for contact in &contacts {
        let favorite = if contact.favorite {
            "★".yellow()
        } else {
            "".normal()
        };

        println!(
            "  {:<5} {:<25} {:<30} {:<20} {}",
            contact.id.to_string().bright_black(),
            contact.name.cyan(),
            contact.email.as_deref().unwrap_or("-"),
            contact.phone.as_deref().unwrap_or("-"),
            favorite
        );
    }

    println!();
    println!(
        "  Showing {} of {}",
        contacts.len().to_string().bright_white().bold(),
        total.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Deletes every contact after confirmation.
///
/// Goes through [`ContactService`] so avatar files are removed and the cache
/// namespace is cleared exactly as `DELETE /api/v1/contacts` does.
async fn purge_contacts(
    repo: Arc<PgContactRepository>,
    config: &Config,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🗑️  Purge Contacts".bright_blue().bold());
    println!();

    let total = repo
        .count(ContactFilter::new())
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    if total == 0 {
        println!("{}", "  Nothing to delete".yellow());
        return Ok(());
    }

    println!(
        "  {} contacts will be deleted with their avatars.",
        total.to_string().bright_white().bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete all contacts?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let cache: Arc<dyn CacheService> = match &config.redis_url {
        Some(url) => match RedisCache::connect(url, config.cache_ttl_seconds).await {
            Ok(redis) => Arc::new(redis),
            Err(e) => {
                println!("{} {}", "⚠️  Cache not cleared:".yellow(), e);
                Arc::new(NullCache::new())
            }
        },
        None => Arc::new(NullCache::new()),
    };

    let storage = LocalAvatarStorage::new(config.upload_dir(), UPLOADS_PUBLIC_PATH)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to open avatar storage: {}", e))?;

    let service = ContactService::new(repo, Arc::new(storage), cache);
    let deleted = service
        .delete_all_contacts()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete contacts: {}", e))?;

    println!();
    println!(
        "{} {}",
        "✅ Deleted contacts:".green().bold(),
        deleted.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Displays contact statistics.
///
/// Shows:
/// - Total number of contacts
/// - Number of favorites
/// - Number of contacts with an avatar
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let (total, favorites, with_avatar): (i64, i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), \
                COUNT(*) FILTER (WHERE favorite), \
                COUNT(*) FILTER (WHERE avatar IS NOT NULL) \
         FROM contacts",
    )
    .fetch_one(pool)
    .await?;

    println!(
        "  Contacts:      {}",
        total.to_string().bright_green().bold()
    );
    println!(
        "  Favorites:     {}",
        favorites.to_string().bright_green().bold()
    );
    println!(
        "  With avatar:   {}",
        with_avatar.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

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
