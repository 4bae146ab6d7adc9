//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod post_repo;


pub use post_repo::PostgresPostRepository;
