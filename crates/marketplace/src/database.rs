//! Schema initializer: creates the marketplace database and its tables.

use sqlx::{Connection, PgConnection};
use tracing::{error, info};

use crate::config::DbConfig;
use crate::errors::DbError;
use crate::schema::{self, quote_identifier};

/// Outcome of [`ensure_database`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseStatus {
    Created,
    AlreadyExists,
}

/// Creates the configured database unless it already exists.
pub async fn ensure_database(config: &DbConfig) -> Result<DatabaseStatus, DbError> {
    let result = try_ensure_database(config).await;
    if let Err(e) = &result {
        error!("Error creating database: {e}");
    }
    result
}

async fn try_ensure_database(config: &DbConfig) -> Result<DatabaseStatus, DbError> {
    // Validate before touching the server; CREATE DATABASE cannot bind the name.
    let quoted = quote_identifier(&config.name)?;

    let mut conn = PgConnection::connect_with(&config.maintenance_options()).await?;

    let exists: Option<i32> = sqlx::query_scalar("SELECT 1 FROM pg_database WHERE datname = $1")
        .bind(&config.name)
        .fetch_optional(&mut conn)
        .await?;

    let status = if exists.is_some() {
        info!("Database '{}' already exists", config.name);
        DatabaseStatus::AlreadyExists
    } else {
        sqlx::raw_sql(&format!("CREATE DATABASE {quoted}"))
            .execute(&mut conn)
            .await?;
        info!("Database '{}' created successfully", config.name);
        DatabaseStatus::Created
    };

    conn.close().await?;
    Ok(status)
}

/// Creates every catalog table in one transaction.
///
/// The DDL uses `IF NOT EXISTS`, so running this against an initialized
/// database changes nothing.
pub async fn create_tables(config: &DbConfig) -> Result<(), DbError> {
    let result = try_create_tables(config).await;
    if let Err(e) = &result {
        error!("Error creating tables: {e}");
    }
    result
}

async fn try_create_tables(config: &DbConfig) -> Result<(), DbError> {
    let mut conn = PgConnection::connect_with(&config.target_options()).await?;
    let mut tx = conn.begin().await?;

    for table in schema::creation_order() {
        sqlx::raw_sql(table.ddl).execute(&mut *tx).await?;
        info!("  Ensured table {}", table.name);
    }

    tx.commit().await?;
    info!("All tables created successfully");

    conn.close().await?;
    Ok(())
}

/// Runs the full initializer: database first, then tables.
pub async fn setup(config: &DbConfig) -> Result<DatabaseStatus, DbError> {
    let status = ensure_database(config).await?;
    create_tables(config).await?;
    info!("Database setup completed successfully");
    Ok(status)
}
