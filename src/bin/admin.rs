//! CLI administration tool for link-shortener.
//!
//! Seeds and manages user accounts, reports link counts and checks the
//! database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a user (prompts for anything not given)
//! cargo run --bin admin -- user create --username admin --admin
//!
//! # List users
//! cargo run --bin admin -- user list
//!
//! # Delete a user and all of their sessions
//! cargo run --bin admin -- user delete admin
//!
//! # Link counts
//! cargo run --bin admin -- links
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use link_shortener::application::services::AuthService;
use link_shortener::domain::credentials::CredentialVerifier;
use link_shortener::domain::repositories::{SessionRepository, UserRepository};
use link_shortener::infrastructure::persistence::{PgSessionRepository, PgUserRepository};
use link_shortener::infrastructure::security::Argon2Verifier;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing link-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show link counts
    Links,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        #[arg(short, long)]
        username: Option<String>,

        /// Password (prompted with confirmation if omitted)
        #[arg(short, long)]
        password: Option<String>,

        /// Grant the admin flag
        #[arg(long)]
        admin: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all users
    List,

    /// Delete a user; their sessions go with them
    Delete { username: String },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

type AdminAuthService =
    AuthService<dyn SessionRepository, dyn UserRepository, dyn CredentialVerifier>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Links => handle_links(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let pool = Arc::new(pool.clone());
    let users: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool.clone()));

    match action {
        UserAction::Create {
            username,
            password,
            admin,
            yes,
        } => {
            let service = auth_service(pool, users);
            create_user(&service, username, password, admin, yes).await?;
        }
        UserAction::List => list_users(users.as_ref()).await?,
        UserAction::Delete { username } => delete_user(users.as_ref(), username).await?,
    }

    Ok(())
}

/// Builds the auth service used for seeding.
///
/// User commands never hash session tokens, so a missing
/// `SESSION_SIGNING_SECRET` is tolerated here.
fn auth_service(pool: Arc<PgPool>, users: Arc<dyn UserRepository>) -> AdminAuthService {
    let sessions: Arc<dyn SessionRepository> = Arc::new(PgSessionRepository::new(pool));
    let verifier: Arc<dyn CredentialVerifier> = Arc::new(Argon2Verifier::new());

    AuthService::new(
        sessions,
        users,
        verifier,
        std::env::var("SESSION_SIGNING_SECRET").unwrap_or_default(),
        chrono::Duration::hours(1),
    )
}

/// Creates a user with interactive prompts for missing values.
///
/// The password is hashed with Argon2id before it reaches the database.
async fn create_user(
    service: &AdminAuthService,
    username: Option<String>,
    password: Option<String>,
    is_admin: bool,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create User".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let password = match password {
        Some(p) => {
            println!("{}", "⚠️  Password taken from the command line".yellow());
            p
        }
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Repeat password", "Passwords do not match")
            .interact()?,
    };

    println!();
    println!("  Username: {}", username.cyan());
    println!(
        "  Admin:    {}",
        if is_admin { "yes".green() } else { "no".bright_black() }
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this user?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let user = service
        .register_user(&username, &password, is_admin)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

    println!();
    println!(
        "{} {}",
        "✅ User created:".green().bold(),
        user.username.cyan()
    );
    println!();
    println!("{}", "Log in with:".bright_white());
    println!(
        "  curl -c cookies.txt -H 'Content-Type: application/json' \\\n    -d '{{\"username\":\"{}\",\"password\":\"...\"}}' http://localhost:3000/login",
        user.username
    );
    println!();

    Ok(())
}

/// Lists users.
///
/// ```text
///   ID  Username                       Admin
///   ──────────────────────────────────────────
///   1   admin                          yes
/// ```
async fn list_users(users: &dyn UserRepository) -> Result<()> {
    println!("{}", "📋 Users".bright_blue().bold());
    println!();

    let list = users
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if list.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<30} {}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Admin".bright_white().bold()
    );
    println!("  {}", "─".repeat(42).bright_black());

    for user in &list {
        let admin = if user.is_admin {
            "yes".green()
        } else {
            "no".bright_black()
        };

        println!(
            "  {:<4} {:<30} {}",
            user.id.to_string().bright_black(),
            user.username.cyan(),
            admin
        );
    }

    println!();
    println!("  Total: {}", list.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Deletes a user after confirmation (default: No).
async fn delete_user(users: &dyn UserRepository, username: String) -> Result<()> {
    println!("{}", "🗑️  Delete User".bright_blue().bold());
    println!();

    let user = users
        .find_by_username(&username)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("User not found")?;

    println!("  Username: {}", user.username.cyan());
    println!("  ID:       {}", user.id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Delete this user and all of their sessions?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    users
        .delete(&user.username)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete user: {}", e))?;

    println!();
    println!("{}", "✅ User deleted".green().bold());
    println!();

    Ok(())
}

/// Shows total links and links that have expired but were not resolved since.
async fn handle_links(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Links".bright_blue().bold());
    println!();

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await?;

    let expired: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM links WHERE expiration_time > 0 AND expiration_time < $1",
    )
    .bind(chrono::Utc::now().timestamp())
    .fetch_one(pool)
    .await?;

    let sessions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE expires_at > NOW()")
        .fetch_one(pool)
        .await?;

    println!("  {:<18} {}", "Total:", total.to_string().bright_green().bold());
    println!("  {:<18} {}", "Expired, unswept:", expired.to_string().yellow().bold());
    println!("  {:<18} {}", "Live sessions:", sessions.to_string().bright_green().bold());
    println!();

    Ok(())
}

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
