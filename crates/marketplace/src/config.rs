//! Connection configuration read from the environment.

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgConnectOptions;

use crate::errors::DbError;

/// Maintenance database used while the target database may not exist yet.
pub const MAINTENANCE_DATABASE: &str = "postgres";

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5432;
pub const DEFAULT_NAME: &str = "marketplace_db";

/// Database server coordinates and credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    /// Name of the marketplace database.
    pub name: String,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            name: DEFAULT_NAME.to_string(),
            user: None,
            password: None,
        }
    }
}

impl DbConfig {
    /// Reads `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER` and `DB_PASSWORD`.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, DbError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DbError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("DB_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| DbError::Config(format!("DB_PORT '{raw}' is not a valid port: {e}")))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: lookup("DB_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            name: lookup("DB_NAME").unwrap_or_else(|| DEFAULT_NAME.to_string()),
            user: lookup("DB_USER"),
            password: lookup("DB_PASSWORD"),
        })
    }

    /// Connection options for `database` on the configured server.
    ///
    /// Unset credentials fall back to libpq conventions (`PGUSER`, `PGPASSWORD`).
    pub fn connect_options(&self, database: &str) -> PgConnectOptions {
        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(database);

        if let Some(user) = &self.user {
            options = options.username(user);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }

        options
    }

    /// Connection options for the marketplace database itself.
    pub fn target_options(&self) -> PgConnectOptions {
        self.connect_options(&self.name)
    }

    /// Connection options for the maintenance database.
    pub fn maintenance_options(&self) -> PgConnectOptions {
        self.connect_options(MAINTENANCE_DATABASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = DbConfig::from_lookup(|_| None).unwrap();

        assert_eq!(config, DbConfig::default());
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5432);
        assert_eq!(config.name, "marketplace_db");
        assert!(config.user.is_none());
        assert!(config.password.is_none());
    }

    #[test]
    fn test_reads_all_variables() {
        let config = DbConfig::from_lookup(lookup_from(&[
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("DB_NAME", "shop"),
            ("DB_USER", "seeder"),
            ("DB_PASSWORD", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 6543);
        assert_eq!(config.name, "shop");
        assert_eq!(config.user.as_deref(), Some("seeder"));
        assert_eq!(config.password.as_deref(), Some("secret"));
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let err = DbConfig::from_lookup(lookup_from(&[("DB_PORT", "not-a-port")])).unwrap_err();
        assert!(matches!(err, DbError::Config(_)));

        let err = DbConfig::from_lookup(lookup_from(&[("DB_PORT", "70000")])).unwrap_err();
        assert!(matches!(err, DbError::Config(_)));
    }

    #[test]
    fn test_connect_options_target_database() {
        let config = DbConfig {
            name: "shop".to_string(),
            ..Default::default()
        };

        assert_eq!(config.target_options().get_database(), Some("shop"));
        assert_eq!(
            config.maintenance_options().get_database(),
            Some(MAINTENANCE_DATABASE)
        );
        assert_eq!(config.target_options().get_port(), 5432);
    }
}
