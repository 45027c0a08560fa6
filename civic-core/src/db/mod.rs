pub mod factory;
pub mod repository;

pub use factory::{DbConfig, RepositoryFactory, RepositoryRegistry, ServerAddress, TlsMode};
pub use repository::{CivicRepository, RepositoryError};
