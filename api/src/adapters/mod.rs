//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod memory;
pub mod openai;
pub mod postgres;

pub use memory::InMemoryPostRepository;
pub use openai::OpenAiClient;
pub use postgres::PostgresPostRepository;
