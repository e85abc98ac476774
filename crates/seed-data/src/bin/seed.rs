//! Default seed script - fills the marketplace schema with sample data
//!
//! Run with:
//! ```
//! cargo run -p seed-data --bin seed
//! ```
//!
//! Set `SEED=<u64>` for a reproducible dataset.

use anyhow::Context;
use marketplace::{DbConfig, init_logging};
use rand::SeedableRng;
use rand::rngs::StdRng;
use seed_data::builders::ScenarioBuilder;
use sqlx::postgres::PgPoolOptions;

fn rng_from_env() -> anyhow::Result<StdRng> {
    match std::env::var("SEED") {
        Ok(raw) => {
            let seed = raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("SEED '{raw}' is not a u64"))?;
            tracing::info!("Using RNG seed {seed}");
            Ok(StdRng::seed_from_u64(seed))
        }
        Err(_) => Ok(StdRng::from_entropy()),
    }
}

async fn run() -> anyhow::Result<()> {
    let config = DbConfig::from_env()?;
    let mut rng = rng_from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_with(config.target_options())
        .await?;

    tracing::info!("Connected to database '{}'", config.name);

    let result = ScenarioBuilder::marketplace()
        .with_metrics(true)
        .build(&pool, &mut rng)
        .await?;

    pool.close().await;

    // Summary output
    for (table, count) in result.table_counts() {
        tracing::info!("  {table}: {count}");
    }
    if let Some(metrics) = &result.metrics {
        tracing::info!(
            "  generated in {} ms, inserted in {} ms",
            metrics.generation_time_ms,
            metrics.seeding_time_ms
        );
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    // Failures are reported, not turned into an exit status.
    match run().await {
        Ok(()) => tracing::info!("Data generation completed successfully"),
        Err(e) => tracing::error!("Data generation failed: {e:#}"),
    }

    Ok(())
}
