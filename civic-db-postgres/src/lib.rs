//! PostgreSQL backend for [`civic_core::CivicRepository`].
//!
//! The schema is not managed here; `schema.sql` at the crate root describes
//! the tables the repository expects.

mod factory;
mod repository;

pub use factory::PostgresRepositoryFactory;
pub use repository::PostgresRepository;
