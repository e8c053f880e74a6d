#![warn(
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

//! Deterministic stand-ins for the hosted model.
//!
//! - [`extractor`] turns a transcript into a [`bugtrail_core::BugTrail`] with
//!   ordered keyword rules.
//! - [`offline`] scripts the simulated customer from the scenario table,
//!   one disclosure stage per customer turn.
//!
//! Neither module performs I/O and neither can fail.

pub mod extractor;
pub mod offline;
pub mod rules;

pub use extractor::heuristic_extract;
pub use offline::{DisclosureStage, GENERIC_GREETING, generate_offline_reply, offline_reply_text};
pub use rules::{KeywordRule, Match};
