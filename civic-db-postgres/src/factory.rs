use async_trait::async_trait;
use civic_core::db::{DbConfig, RepositoryFactory};
use civic_core::{CivicRepository, RepositoryError};
use tracing::info;

use crate::repository::{PostgresRepository, server_options};

/// [`RepositoryFactory`] for PostgreSQL, registered as `"postgres"`.
pub struct PostgresRepositoryFactory;

#[async_trait]
impl RepositoryFactory for PostgresRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    /// `config.connection_string` is a `postgres://` URL. When it is empty
    /// the discrete `config.server` address is used instead. The tables in
    /// `schema.sql` must already exist.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn CivicRepository>, RepositoryError> {
        let connected = match (config.connection_string.is_empty(), &config.server) {
            (false, _) => PostgresRepository::new(&config.connection_string, config.tls).await,
            (true, Some(server)) => {
                PostgresRepository::connect(server_options(server, config.tls)).await
            }
            (true, None) => {
                return Err(RepositoryError::Configuration(
                    "postgres needs a connection string or a server address".to_string(),
                ));
            }
        };
        let repo = connected.map_err(|e| RepositoryError::Connection(format!("{:#}", e)))?;
        match config.tls {
            Some(tls) => info!(tls = %tls, "postgres pool ready"),
            None => info!("postgres pool ready"),
        }
        Ok(Box::new(repo))
    }
}
