#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Model-backed roleplay and extraction with deterministic fallback.
//!
//! Both services make at most one model call per request. A missing
//! provider, a transport error, an empty reply or unparseable output all
//! end in the heuristic engines from `bugtrail_heuristics`, so the only
//! errors a caller sees are bad requests.

mod extraction;
pub mod prompts;
mod roleplay;

pub use extraction::{Extraction, ExtractionService, ExtractionSource};
pub use roleplay::{RoleplayReply, RoleplayRequest, RoleplayService};

use thiserror::Error;

/// Request-level failures. Model failures never surface here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Invalid scenario")]
    InvalidScenario,

    #[error("No agent message found")]
    NoAgentMessage,

    #[error("No conversation history provided")]
    EmptyHistory,
}
