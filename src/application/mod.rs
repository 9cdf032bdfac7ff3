//! Application layer containing the core business logic orchestration.
//!
//! This module defines the `SubmissionPipeline` which acts as the primary
//! entry point for handling submissions. It sequences the collaborator
//! round trips and publishes its state through a `tokio` watch channel.

pub mod pipeline;
