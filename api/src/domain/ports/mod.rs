//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod ai;
pub mod repositories;

pub use ai::{ContentClassifier, TextGenerator};
pub use repositories::PostRepository;
