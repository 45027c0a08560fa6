use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{CouncilMember, Project, TaxRecord};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Read-only access to the civic records store.
///
/// Every `list_*` method returns the whole table ordered by ascending `id`.
/// Filtering happens on the client, never here.
#[async_trait]
pub trait CivicRepository: Send + Sync {
    /// Current time according to the store. Used as a connectivity probe.
    async fn database_time(&self) -> Result<DateTime<Utc>, RepositoryError>;

    async fn list_tax_records(&self) -> Result<Vec<TaxRecord>, RepositoryError>;
    async fn list_council_members(&self) -> Result<Vec<CouncilMember>, RepositoryError>;
    async fn list_projects(&self) -> Result<Vec<Project>, RepositoryError>;

    /// Release pooled connections. Called once on shutdown.
    async fn close(&self);
}
