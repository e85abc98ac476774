use marketplace::{DatabaseStatus, DbConfig, DbError, init_logging, setup};

async fn run() -> Result<DatabaseStatus, DbError> {
    let config = DbConfig::from_env()?;
    tracing::info!(
        "Initializing database '{}' on {}:{}",
        config.name,
        config.host,
        config.port
    );
    setup(&config).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    // Failures are reported, not turned into an exit status.
    if let Err(e) = run().await {
        tracing::error!("Database setup failed: {e}");
    }

    Ok(())
}
