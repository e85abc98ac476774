//! Integration tests for the schema initializer.
//!
//! These tests need a reachable PostgreSQL server and a role allowed to create
//! databases. Connection settings come from the usual `DB_HOST`, `DB_PORT`,
//! `DB_USER` and `DB_PASSWORD` variables; the tests skip themselves when
//! `DB_USER` is not set.
//!
//! Run with: `DB_USER=postgres DB_PASSWORD=... cargo nextest run -p marketplace`
//!
//! Each test works in its own throwaway database and drops it afterwards.

use marketplace::schema::{creation_order, quote_identifier};
use marketplace::{DatabaseStatus, DbConfig, create_tables, ensure_database, setup};
use sqlx::{Connection, PgConnection};

/// Builds a config pointing at a fresh database, or `None` to skip.
fn test_config(suffix: &str) -> Option<DbConfig> {
    if std::env::var("DB_USER").is_err() {
        eprintln!("Skipping test: DB_USER not set");
        return None;
    }

    let mut config = match DbConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Skipping test: {e}");
            return None;
        }
    };
    config.name = format!("marketplace_test_{}_{suffix}", std::process::id());
    Some(config)
}

async fn drop_database(config: &DbConfig) {
    let mut conn = PgConnection::connect_with(&config.maintenance_options())
        .await
        .expect("connect to maintenance database");
    let quoted = quote_identifier(&config.name).expect("valid test name");
    sqlx::raw_sql(&format!("DROP DATABASE IF EXISTS {quoted}"))
        .execute(&mut conn)
        .await
        .expect("drop test database");
}

#[tokio::test]
async fn test_database_creation_is_idempotent() {
    let Some(config) = test_config("create") else {
        return;
    };

    let first = ensure_database(&config).await.expect("first run");
    let second = ensure_database(&config).await.expect("second run");

    assert_eq!(first, DatabaseStatus::Created);
    assert_eq!(second, DatabaseStatus::AlreadyExists);

    drop_database(&config).await;
}

#[tokio::test]
async fn test_setup_creates_all_tables_and_reruns_cleanly() {
    let Some(config) = test_config("tables") else {
        return;
    };

    setup(&config).await.expect("initial setup");
    // IF NOT EXISTS makes a second pass a no-op rather than an error.
    create_tables(&config).await.expect("second table pass");

    let mut conn = PgConnection::connect_with(&config.target_options())
        .await
        .expect("connect to test database");
    let tables: Vec<String> = sqlx::query_scalar(
        "SELECT table_name::text FROM information_schema.tables WHERE table_schema = 'public'",
    )
    .fetch_all(&mut conn)
    .await
    .expect("list tables");
    conn.close().await.expect("close");

    for table in creation_order() {
        assert!(
            tables.iter().any(|t| t == table.name),
            "missing table {}",
            table.name
        );
    }

    drop_database(&config).await;
}

#[tokio::test]
async fn test_rejects_unsafe_database_name() {
    let Some(mut config) = test_config("unsafe") else {
        return;
    };
    config.name = "shop; DROP DATABASE postgres".to_string();

    let err = ensure_database(&config).await.unwrap_err();
    assert!(matches!(err, marketplace::DbError::InvalidIdentifier(_)));
}
