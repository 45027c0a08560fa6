use std::path::PathBuf;

use async_trait::async_trait;
use civic_core::db::{DbConfig, RepositoryFactory};
use civic_core::{CivicRepository, RepositoryError};
use tracing::info;

use crate::repository::SqliteRepository;

/// Resolve the seeds directory at runtime.
///
/// Resolution order:
/// 1. `CIVIC_DB_SQLITE_SEEDS_DIR`, when set.
/// 2. `./seeds`, when it exists in the current working directory.
/// 3. `$CARGO_MANIFEST_DIR/seeds` as a last resort for the build tree.
fn seeds_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CIVIC_DB_SQLITE_SEEDS_DIR") {
        return PathBuf::from(dir);
    }
    let cwd_seeds = PathBuf::from("./seeds");
    if cwd_seeds.is_dir() {
        return cwd_seeds;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("seeds")
}

/// [`RepositoryFactory`] for SQLite.
///
/// ```rust,no_run
/// use civic_core::db::RepositoryRegistry;
/// use civic_db_sqlite::SqliteRepositoryFactory;
///
/// let mut registry = RepositoryRegistry::new();
/// registry.register(Box::new(SqliteRepositoryFactory));
/// ```
pub struct SqliteRepositoryFactory;

#[async_trait]
impl RepositoryFactory for SqliteRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database at `config.connection_string`, apply migrations and
    /// load the sample seeds. `config.tls` is ignored.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn CivicRepository>, RepositoryError> {
        if config.connection_string.is_empty() {
            return Err(RepositoryError::Configuration(
                "sqlite needs a database path or :memory:".to_string(),
            ));
        }
        let repo = SqliteRepository::new(&config.connection_string)
            .await
            .map_err(|e| RepositoryError::Connection(format!("{:#}", e)))?;
        repo.run_migrations()
            .await
            .map_err(|e| RepositoryError::Database(format!("{:#}", e)))?;

        let seeds = seeds_dir();
        repo.run_seeds(&seeds)
            .await
            .map_err(|e| RepositoryError::Database(format!("{:#}", e)))?;
        info!(seeds = %seeds.display(), "sqlite store ready");

        Ok(Box::new(repo))
    }
}
