//! CLI administration tool for tinylinks.
//!
//! Manages accounts and inspects links directly in PostgreSQL, without going
//! through the web pages.
//!
//! # Usage
//!
//! ```bash
//! # Create a user (prompts for missing values)
//! cargo run --bin admin -- user create --email a@example.com
//!
//! # List users
//! cargo run --bin admin -- user list
//!
//! # Reset a password
//! cargo run --bin admin -- user passwd a@example.com
//!
//! # Show a user's links with click totals
//! cargo run --bin admin -- urls a@example.com
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use tinylinks::application::services::{AuthService, UrlService};
use tinylinks::domain::entities::User;
use tinylinks::domain::repositories::UserRepository;
use tinylinks::infrastructure::persistence::{PgUrlRepository, PgUserRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing tinylinks.
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
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show a user's short links with click totals
    Urls {
        /// Email of the owner
        email: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Account management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Register a new user
    Create {
        #[arg(short, long)]
        email: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all users
    List,

    /// Set a new password for a user
    Passwd {
        /// Email of the user
        email: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and apply migrations
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    let pool = Arc::new(pool);
    let users = Arc::new(PgUserRepository::new(pool.clone()));

    match cli.command {
        Commands::User { action } => handle_user_action(action, users).await?,
        Commands::Urls { email } => {
            let urls = Arc::new(PgUrlRepository::new(pool.clone()));
            show_urls(users, UrlService::new(urls), &email).await?
        }
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches account management commands.
async fn handle_user_action(action: UserAction, users: Arc<PgUserRepository>) -> Result<()> {
    match action {
        UserAction::Create { email, yes } => create_user(AuthService::new(users), email, yes).await,
        UserAction::List => list_users(users).await,
        UserAction::Passwd { email } => change_password(users, &email).await,
    }
}

async fn find_user(users: &PgUserRepository, email: &str) -> Result<User> {
    let id = users
        .find_id_by_email(email)
        .await?
        .with_context(|| format!("No user with email {email}"))?;

    users
        .get(&id)
        .await?
        .with_context(|| format!("No user with email {email}"))
}

fn prompt_password() -> Result<String> {
    Ok(Password::new()
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords don't match")
        .interact()?)
}

/// Registers a user with the same rules as the registration page.
async fn create_user(
    auth: AuthService<PgUserRepository>,
    email: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Create user".bright_blue().bold());
    println!();

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = prompt_password()?;

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Create user {email}?"))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let user = auth.register(&email, &password).await?;

    println!();
    println!("{}", "User created".green().bold());
    println!("  ID:    {}", user.id.bright_black());
    println!("  Email: {}", user.email.cyan());
    println!();

    Ok(())
}

/// Lists all users, oldest first.
async fn list_users(users: Arc<PgUserRepository>) -> Result<()> {
    println!("{}", "Users".bright_blue().bold());
    println!();

    let all = users.list().await?;

    if all.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!(
            "  Create one with: {} admin user create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<8} {:<40} {:<20}",
        "ID".bright_white().bold(),
        "Email".bright_white().bold(),
        "Registered".bright_white().bold()
    );
    println!("  {}", "-".repeat(70).bright_black());

    for user in &all {
        println!(
            "  {:<8} {:<40} {}",
            user.id.bright_black(),
            user.email.cyan(),
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!("  Total: {}", all.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Replaces a user's password after confirmation.
async fn change_password(users: Arc<PgUserRepository>, email: &str) -> Result<()> {
    println!("{}", "Change password".bright_blue().bold());
    println!();

    let user = find_user(&users, email).await?;
    println!("  User: {}", user.email.cyan());
    println!();

    let password = prompt_password()?;

    AuthService::new(users).change_password(&user.id, &password).await?;

    println!();
    println!("{}", "Password updated".green().bold());
    println!();

    Ok(())
}

/// Prints a user's links with click totals.
async fn show_urls(
    users: Arc<PgUserRepository>,
    urls: UrlService<PgUrlRepository>,
    email: &str,
) -> Result<()> {
    let user = find_user(&users, email).await?;

    println!(
        "{} {}",
        "Links of".bright_blue().bold(),
        user.email.cyan().bold()
    );
    println!();

    let overviews = urls.list_for_owner(&user).await?;

    if overviews.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        return Ok(());
    }

    println!(
        "  {:<8} {:>7} {:>7}  {}",
        "ID".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Uniques".bright_white().bold(),
        "Long URL".bright_white().bold()
    );
    println!("  {}", "-".repeat(70).bright_black());

    for o in &overviews {
        println!(
            "  {:<8} {:>7} {:>7}  {}",
            o.record.id.bright_black(),
            o.summary.click_count.to_string().bright_green(),
            o.summary.unique_visitor_count.to_string().bright_green(),
            o.record.long_url
        );
    }

    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "Database connection OK, migrations applied".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
    }

    Ok(())
}
