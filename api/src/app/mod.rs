//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and external systems.

pub mod assist_service;
pub mod feed_service;
pub mod moderation_gate;
pub mod prompts;
pub mod submission_service;

pub use assist_service::AssistService;
pub use feed_service::{DashboardEntry, FeedService};
pub use moderation_gate::ModerationGate;
pub use submission_service::{
    AddCommentRequest, CreatePostRequest, SubmissionOutcome, SubmissionService,
};
