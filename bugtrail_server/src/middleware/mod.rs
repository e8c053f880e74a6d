//! HTTP middleware stack: CORS and per-request trace spans.

pub mod cors;
pub mod trace;

pub use trace::X_TRACE_ID;
