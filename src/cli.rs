use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use crate::{
    config::Config,
    context::RequestContext,
    db::{self, SqliteShipmentStore, UserStore},
    models::{Identity, Role},
    routes,
    services::ShipmentService,
    state::AppState,
};

#[derive(Debug, Parser)]
#[command(name = "shipment-ledger", version, about = "Shipment record keeping server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,
    /// Create any missing tables
    Migrate,
    /// Delete every shipment record
    Reset {
        /// Confirm that all records should be deleted
        #[arg(long)]
        yes: bool,
    },
    /// Create a user or update an existing one
    AddUser {
        #[arg(long)]
        username: String,
        /// Display name
        #[arg(long)]
        name: String,
        /// admin, manager or driver
        #[arg(long)]
        role: Role,
        #[arg(long)]
        password: String,
    },
    /// Write every shipment record to an Excel workbook
    Export {
        #[arg(long, short, default_value = crate::export::EXPORT_FILENAME)]
        output: PathBuf,
    },
}

/// Run a parsed command line
pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    if let Command::Reset { yes: false } = cli.command {
        bail!("Refusing to delete all shipment records without --yes");
    }

    // Only migrate may create a new database file
    if !matches!(cli.command, Command::Migrate)
        && !db::database_exists(&config.database_url).await?
    {
        bail!(
            "Database {} does not exist; run `shipment-ledger migrate` first",
            config.database_url
        );
    }

    let pool = db::init_db_pool(&config.database_url, config.max_pool_size)
        .await
        .with_context(|| format!("Failed to open database {}", config.database_url))?;

    match cli.command {
        Command::Serve => serve(pool, &config).await,
        Command::Migrate => {
            db::migrate(&pool).await?;
            Ok(())
        }
        Command::Reset { .. } => {
            ensure_schema(&pool).await?;
            db::reset_shipments(&pool).await?;
            Ok(())
        }
        Command::AddUser {
            username,
            name,
            role,
            password,
        } => {
            ensure_schema(&pool).await?;
            let user = UserStore::new(pool)
                .save_user(&username, &name, role, &password)
                .await?;
            println!("Saved user '{}' ({})", user.username, user.role);
            Ok(())
        }
        Command::Export { output } => {
            ensure_schema(&pool).await?;
            let service =
                ShipmentService::new(Arc::new(SqliteShipmentStore::new(pool)), config.negative_dues);
            let workbook = service
                .export(&RequestContext::new(Identity::operator()))
                .await?;
            tokio::fs::write(&output, workbook)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Exported records to {}", output.display());
            Ok(())
        }
    }
}

async fn ensure_schema(pool: &db::DbPool) -> anyhow::Result<()> {
    if !db::schema_ready(pool).await? {
        bail!("Database schema is missing; run `shipment-ledger migrate` first");
    }
    Ok(())
}

async fn serve(pool: db::DbPool, config: &Config) -> anyhow::Result<()> {
    ensure_schema(&pool).await?;
    let jwt_secret = config.require_jwt_secret()?;

    let app = routes::app(AppState::from_pool(pool, config, jwt_secret));

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Starting server on {}", addr);
    tracing::info!("Negative dues policy: {}", config.negative_dues);

    axum::serve(listener, app).await?;
    Ok(())
}
