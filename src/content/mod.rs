//! Article detail retrieval.
//!
//! Details are simulated: a fixed delay stands in for network latency and the
//! body is a canned description. [`DetailState`] tracks each item's progress.

mod detail;

pub use detail::{detail_text, fetch_detail, DetailState, DEFAULT_DETAIL_DELAY};
