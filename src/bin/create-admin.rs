//! Create (or re-key) an admin account.
//!
//! Usage:
//!   DATABASE_URL=... ./create-admin --username admin --password ...

use anyhow::{Context, Result};
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use std::env;

use autogram_api::services::auth::AdminAuthService;

#[derive(Parser)]
#[command(about = "Create an admin account for the Autogram API")]
struct Args {
    #[arg(long)]
    username: String,

    #[arg(long)]
    password: String,

    /// Overwrite the password if the admin already exists.
    #[arg(long)]
    force: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let database_url = env::var("DATABASE_URL").context("DATABASE_URL required")?;
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let existing = sqlx::query_scalar::<_, i64>("SELECT id FROM admin WHERE username = $1")
        .bind(&args.username)
        .fetch_optional(&pool)
        .await?;

    let hash = AdminAuthService::hash_password(&args.password)?;

    match existing {
        Some(id) if args.force => {
            sqlx::query("UPDATE admin SET password = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(&hash)
                .execute(&pool)
                .await?;
            println!("Updated password for admin '{}'", args.username);
        }
        Some(_) => {
            anyhow::bail!(
                "Admin '{}' already exists (use --force to reset the password)",
                args.username
            );
        }
        None => {
            sqlx::query("INSERT INTO admin (username, password) VALUES ($1, $2)")
                .bind(&args.username)
                .bind(&hash)
                .execute(&pool)
                .await?;
            println!("Created admin '{}'", args.username);
        }
    }

    Ok(())
}
