pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod models;
pub mod schema;

use tracing_subscriber::EnvFilter;

pub use config::DbConfig;
pub use database::{DatabaseStatus, create_tables, ensure_database, setup};
pub use errors::DbError;

/// Installs the fmt subscriber used by the workspace binaries.
///
/// Honours `RUST_LOG`, defaulting to `info`.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
