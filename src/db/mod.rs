use sqlx::{Pool, Sqlite, migrate::MigrateDatabase, sqlite::SqlitePoolOptions};
use std::time::Duration;

pub mod shipment_store;
pub mod user_store;

pub use shipment_store::{ShipmentRepository, SqliteShipmentStore};
pub use user_store::UserStore;

pub type DbPool = Pool<Sqlite>;

/// Name of the table holding shipment records
pub const SHIPMENT_TABLE: &str = "field";

const CREATE_SHIPMENTS: &str = r#"
    CREATE TABLE IF NOT EXISTS field (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        source TEXT NOT NULL CHECK (length(trim(source)) > 0),
        destination TEXT NOT NULL CHECK (length(trim(destination)) > 0),
        product_name TEXT NOT NULL CHECK (length(trim(product_name)) > 0),
        date TEXT NOT NULL,
        quantity INTEGER NOT NULL CHECK (quantity BETWEEN 1 AND 1000000),
        weight REAL NOT NULL CHECK (weight >= 1.0),
        driver_name TEXT NOT NULL CHECK (length(trim(driver_name)) > 0),
        truck TEXT NOT NULL CHECK (length(trim(truck)) > 0),
        toll_fees REAL NOT NULL CHECK (toll_fees >= 0),
        food_costs REAL NOT NULL CHECK (food_costs >= 0),
        amount_charged REAL NOT NULL CHECK (amount_charged > 0),
        driver_due REAL NOT NULL,
        owner_due REAL NOT NULL,
        created_by TEXT NOT NULL,
        created_at TEXT NOT NULL
    );
"#;

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        name TEXT NOT NULL,
        role TEXT NOT NULL CHECK (role IN ('admin', 'manager', 'driver')),
        password_hash TEXT NOT NULL,
        last_edit TEXT NOT NULL
    );
"#;

/// Whether the database at `database_url` already exists. In-memory databases always do.
pub async fn database_exists(database_url: &str) -> Result<bool, sqlx::Error> {
    Sqlite::database_exists(database_url).await
}

/// Open a connection pool, creating the database file if it doesn't exist.
///
/// This never touches the schema; see [`migrate`] and [`reset_shipments`].
pub async fn init_db_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        tracing::info!("Creating database {}", database_url);
        Sqlite::create_database(database_url).await?;
    }

    // An in-memory database lives as long as its single connection
    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .idle_timeout(None)
        .max_lifetime(None)
        .connect(database_url)
        .await
}

/// Create the tables if they are missing. Safe to run repeatedly.
pub async fn migrate(pool: &DbPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query(CREATE_SHIPMENTS).execute(&mut *tx).await?;
    sqlx::query(CREATE_USERS).execute(&mut *tx).await?;
    tx.commit().await?;

    tracing::info!("Schema is up to date");
    Ok(())
}

/// Drop every shipment record and recreate an empty table. Users are kept.
pub async fn reset_shipments(pool: &DbPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("DROP TABLE IF EXISTS field")
        .execute(&mut *tx)
        .await?;
    sqlx::query(CREATE_SHIPMENTS).execute(&mut *tx).await?;
    tx.commit().await?;

    tracing::warn!("Shipment table has been reset");
    Ok(())
}

/// Whether [`migrate`] has been run against this database
pub async fn schema_ready(pool: &DbPool) -> Result<bool, sqlx::Error> {
    let count: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('field', 'users')",
    )
    .fetch_one(pool)
    .await?;

    Ok(count.0 == 2)
}
