use std::env;

use tokio_postgres::{Client, NoTls};
use tracing::error;

use crate::error::LoadError;

/// PostgreSQL connection settings.
///
/// Host, port, and database name are fixed; only the credentials vary
/// and they come from the environment so the password never appears in
/// code, on a command line, or in shell history.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl ConnectionConfig {
    /// Resolve credentials from the `DB_USER` and `DB_PASS` environment
    /// variables.
    ///
    /// A missing variable is reported as a configuration error instead
    /// of being interpolated into a malformed connection string.
    pub fn from_env() -> Result<Self, LoadError> {
        let user = env::var("DB_USER")
            .map_err(|_| LoadError::config("DB_USER environment variable is not set"))?;
        let password = env::var("DB_PASS")
            .map_err(|_| LoadError::config("DB_PASS environment variable is not set"))?;

        Ok(Self {
            host: "localhost".to_string(),
            port: 5432,
            database: "baseball".to_string(),
            user,
            password,
        })
    }

    fn pg_config(&self) -> tokio_postgres::Config {
        let mut config = tokio_postgres::Config::new();
        config
            .host(&self.host)
            .port(self.port)
            .dbname(&self.database)
            .user(&self.user)
            .password(&self.password);
        config
    }

    /// Connect and spawn the driver's connection task.
    ///
    /// The returned client is reused sequentially for every statement
    /// of the run; each statement commits independently.
    pub async fn connect(&self) -> Result<Client, LoadError> {
        let (client, connection) = self.pg_config().connect(NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!("connection error: {}", e);
            }
        });

        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the process environment is only mutated from one place.
    #[test]
    fn test_from_env() {
        env::set_var("DB_USER", "tester");
        env::set_var("DB_PASS", "secret");

        let config = ConnectionConfig::from_env().unwrap();
        assert_eq!(config.user, "tester");
        assert_eq!(config.password, "secret");
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5432);
        assert_eq!(config.database, "baseball");

        env::remove_var("DB_PASS");
        let err = ConnectionConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("DB_PASS"));

        env::remove_var("DB_USER");
        let err = ConnectionConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("DB_USER"));
    }
}
