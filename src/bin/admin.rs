//! Account administration CLI.
//!
//! Accounts are not self-service: an operator seeds them here, then users
//! log in through `POST /auth/login`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::Password;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

use linkdash::application::services::hash_with_secret;
use linkdash::domain::repositories::UserRepository;
use linkdash::infrastructure::persistence::PgUserRepository;

#[derive(Parser)]
#[command(name = "admin", version, about = "Account administration for linkdash")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a user account (prompts for a password)
    CreateUser {
        /// Email address for the new account
        email: String,
    },
    /// List registered accounts
    ListUsers,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let signing_secret =
        std::env::var("TOKEN_SIGNING_SECRET").context("TOKEN_SIGNING_SECRET must be set")?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let users = PgUserRepository::new(Arc::new(pool));

    match cli.command {
        Command::CreateUser { email } => {
            let password = Password::new()
                .with_prompt("Password")
                .with_confirmation("Confirm password", "Passwords do not match")
                .interact()?;

            let user = users
                .create(&email, &hash_with_secret(&signing_secret, &password))
                .await?;

            println!(
                "{} user {} (id {})",
                "Created".green().bold(),
                user.email,
                user.id
            );
        }
        Command::ListUsers => {
            let all = users.list().await?;

            if all.is_empty() {
                println!("{}", "No users registered".yellow());
                return Ok(());
            }

            for user in all {
                println!(
                    "{:>6}  {}  registered {}",
                    user.id,
                    user.email,
                    user.created_at.format("%Y-%m-%d")
                );
            }
        }
    }

    Ok(())
}
