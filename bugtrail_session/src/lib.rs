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

//! Client-local state for a BugTrail session.
//!
//! Four independent slots hold the chat log, the customer persona, the
//! selected scenario and the last extracted report. Each slot is one
//! whole document in a [`KeyValueStore`].

mod manager;
mod store;

pub use manager::{Slot, StateManager};
pub use store::{FileStore, KeyValueStore, MemoryStore};

use thiserror::Error;

/// Errors raised by the state stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid state key: {0:?}")]
    InvalidKey(String),

    #[error("State store lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, StoreError>;
