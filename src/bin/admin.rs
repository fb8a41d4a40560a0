//! CLI administration tool for contest-hub.
//!
//! Provides commands for managing user roles, issuing credentials,
//! and checking the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List users and their roles
//! cargo run --bin admin -- user list
//!
//! # Promote a user (e.g. bootstrap the first admin)
//! cargo run --bin admin -- user promote ann@example.com --role admin
//!
//! # Sign a credential for manual API calls
//! cargo run --bin admin -- token issue ann@example.com
//!
//! # Check database connection and row counts
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string (user and db commands)
//! - `ACCESS_TOKEN_SECRET`: signing secret (token command)
//! - `TOKEN_TTL_HOURS`: credential lifetime (token command, default: 24)

use contest_hub::application::services::AuthService;
use contest_hub::domain::entities::Role;
use contest_hub::domain::repositories::UserRepository;
use contest_hub::infrastructure::persistence::{MemoryStore, PgUserRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use serde_json::{Map, json};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing contest-hub.
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
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Issue credentials
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// List all users with their roles
    List,

    /// Set a user's role
    Promote {
        /// Email of the user
        email: String,

        /// New role: participant, creator or admin
        #[arg(short, long, default_value = "creator")]
        role: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Credential subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Sign a credential for an email
    Issue {
        /// Email to embed in the credential
        email: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and show row counts
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::User { action } => handle_user_action(action, &connect().await?).await?,
        Commands::Token { action } => handle_token_action(action)?,
        Commands::Db { action } => handle_db_action(action, &connect().await?).await?,
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let repo = PgUserRepository::new(Arc::new(pool.clone()));

    match action {
        UserAction::List => list_users(&repo).await,
        UserAction::Promote { email, role, yes } => promote_user(&repo, &email, &role, yes).await,
    }
}

/// Lists all users.
///
/// # Output Format
///
/// ```text
/// 👥 Users
///
///   ID  Email                          Role         Joined
///   ───────────────────────────────────────────────────────────────────
///   1   ann@example.com                admin        2026-01-15 10:30
/// ```
async fn list_users(repo: &PgUserRepository) -> Result<()> {
    println!("{}", "👥 Users".bright_blue().bold());
    println!();

    let users = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        return Ok(());
    }

    println!(
        "  {:<4} {:<30} {:<12} {:<16}",
        "ID".bright_white().bold(),
        "Email".bright_white().bold(),
        "Role".bright_white().bold(),
        "Joined".bright_white().bold()
    );
    println!("  {}", "─".repeat(66).bright_black());

    for user in &users {
        let role = match user.role {
            Role::Admin => user.role.as_str().red(),
            Role::Creator => user.role.as_str().green(),
            Role::Participant => user.role.as_str().normal(),
        };

        println!(
            "  {:<4} {:<30} {:<12} {}",
            user.id.to_string().bright_black(),
            user.email.cyan(),
            role,
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Sets a user's role after confirmation (default: No).
async fn promote_user(repo: &PgUserRepository, email: &str, role: &str, yes: bool) -> Result<()> {
    println!("{}", "🛡️  Change Role".bright_blue().bold());
    println!();

    let role: Role = role
        .parse()
        .map_err(|_| anyhow::anyhow!("Unknown role '{}' (participant, creator, admin)", role))?;

    let user = repo
        .find_by_email(email)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("User not found")?;

    if user.role == role {
        println!("{}", format!("⚠️  {} is already {}", email, role).yellow());
        return Ok(());
    }

    println!("  User: {}", user.email.cyan());
    println!("  Role: {} → {}", user.role.as_str().bright_black(), role.as_str().green());
    println!();

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Apply this change?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    repo.update_role(user.id, role)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update role: {}", e))?;

    println!();
    println!("{}", "✅ Role updated".green().bold());
    println!();

    Ok(())
}

/// Dispatches credential commands. Signing needs the secret, not the database.
fn handle_token_action(action: TokenAction) -> Result<()> {
    match action {
        TokenAction::Issue { email } => {
            let secret =
                std::env::var("ACCESS_TOKEN_SECRET").context("ACCESS_TOKEN_SECRET must be set")?;
            let ttl_hours: i64 = std::env::var("TOKEN_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(24);

            let auth = AuthService::new(Arc::new(MemoryStore::new()), &secret, ttl_hours);

            let mut claims = Map::new();
            claims.insert("email".to_string(), json!(email));
            let token = auth
                .issue(claims)
                .map_err(|e| anyhow::anyhow!("Failed to sign credential: {}", e))?;

            println!("{}", "🔑 Credential".bright_blue().bold());
            println!();
            println!("  Email:   {}", email.cyan());
            println!("  Expires: {}h", ttl_hours.to_string().bright_white());
            println!("  Token:   {}", token.bright_yellow());
            println!();
            println!("{}", "Example:".bright_white());
            println!(
                "  curl -H \"token: {}\" http://localhost:5000/profile",
                token.bright_yellow()
            );
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

            println!("{}", "✅ Database connection OK".green().bold());
            println!();

            for table in ["users", "contests", "payments"] {
                let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
                    .fetch_one(pool)
                    .await?;
                println!(
                    "  {:<10} {}",
                    table,
                    count.to_string().bright_green().bold()
                );
            }

            let winners: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM payments WHERE is_win")
                .fetch_one(pool)
                .await?;
            println!("  {:<10} {}", "winners", winners.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}
