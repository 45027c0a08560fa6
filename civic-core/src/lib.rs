pub mod calculations;
pub mod db;
pub mod filters;
pub mod models;

pub use db::repository::{CivicRepository, RepositoryError};
pub use models::*;
