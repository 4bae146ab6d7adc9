//! In-memory adapters
//!
//! Volatile storage owned by the repository instance. State is lost on restart.

pub mod post_repo;
mod seed;

pub use post_repo::InMemoryPostRepository;
