mod config;
mod error;
mod identity;
mod routes;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use fete_core::gateway::{self, HttpChatGateway};
use fete_db::pool;

use config::FeteConfig;
use routes::AppState;

#[derive(Parser)]
#[command(name = "fete", about = "AI-assisted event planning service")]
struct Cli {
    /// Database URL (overrides FETE_DATABASE_URL env var)
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a fete config file (no database required)
    Init {
        /// PostgreSQL connection URL
        #[arg(long, default_value = "postgresql://localhost:5432/fete")]
        db_url: String,
        /// Chat gateway base URL
        #[arg(long, default_value = gateway::DEFAULT_GATEWAY_URL)]
        gateway_url: String,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Initialize the fete database (creates it if absent, runs migrations)
    DbInit,
    /// Run the HTTP service
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
        /// Port to listen on
        #[arg(long, default_value_t = 8787)]
        port: u16,
    },
}

/// Execute the `fete init` command: write config file.
fn cmd_init(db_url: &str, gateway_url: &str, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile {
        database: config::DatabaseSection {
            url: db_url.to_string(),
        },
        gateway: config::GatewaySection {
            url: gateway_url.to_string(),
        },
    };
    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  database.url = {db_url}");
    println!("  gateway.url = {gateway_url}");
    println!();
    println!("Set FETE_AI_API_KEY in the environment to enable generation.");
    println!("Next: run `fete db-init` to create and migrate the database.");

    Ok(())
}

/// Execute the `fete db-init` command: create database and run migrations.
async fn cmd_db_init(cli_db_url: Option<&str>) -> anyhow::Result<()> {
    let resolved = FeteConfig::resolve(cli_db_url)?;

    println!("Initializing fete database...");

    // 1. Create the database if it does not exist.
    pool::ensure_database_exists(&resolved.db_config).await?;

    // 2. Connect to the target database.
    let db_pool = pool::create_pool(&resolved.db_config).await?;

    // 3. Run embedded migrations.
    pool::run_migrations(&db_pool).await?;

    // 4. Clean shutdown.
    db_pool.close().await;

    println!("fete db-init complete.");
    Ok(())
}

/// Execute the `fete serve` command.
async fn cmd_serve(cli_db_url: Option<&str>, bind: &str, port: u16) -> anyhow::Result<()> {
    let resolved = FeteConfig::resolve(cli_db_url)?;

    if resolved.gateway_config.api_key.is_none() {
        tracing::warn!(
            "FETE_AI_API_KEY is not set; generation requests will fail until it is configured"
        );
    }

    let db_pool = pool::create_pool(&resolved.db_config).await?;
    let gateway = HttpChatGateway::new(resolved.gateway_config)?;

    let state = AppState {
        pool: db_pool.clone(),
        gateway: Arc::new(gateway),
    };

    let result = routes::run_serve(state, bind, port).await;
    db_pool.close().await;
    result
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            db_url,
            gateway_url,
            force,
        } => {
            cmd_init(&db_url, &gateway_url, force)?;
        }
        Commands::DbInit => {
            cmd_db_init(cli.database_url.as_deref()).await?;
        }
        Commands::Serve { bind, port } => {
            cmd_serve(cli.database_url.as_deref(), &bind, port).await?;
        }
    }

    Ok(())
}
