//! Schema migration command

use anyhow::{Context, Result};
use clap::Parser;

use setlist_server::db::{create_pool, migrations};

use super::DEFAULT_DATABASE_URL;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// SQLite database URL
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,
}

/// Create or update the schema, then exit
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let pool = create_pool(&args.database_url)
        .await
        .with_context(|| format!("Failed to open database {}", args.database_url))?;

    migrations::run(&pool)
        .await
        .context("Failed to apply migrations")?;

    pool.close().await;
    println!("Schema up to date: {}", args.database_url);
    Ok(())
}
