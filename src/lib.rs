//! Campus news feed simulator.
//!
//! A timer-driven generator produces synthetic news items; the
//! [`engine::FeedEngine`] filters them by category, keeps them newest-first,
//! lazily fetches a simulated detail body per item and counts reads.
//!
//! - [`feed`] - Items, categories and the generator
//! - [`content`] - Simulated detail fetch and its state
//! - [`engine`] - The stateful core and its event channel
//! - [`config`] - Optional TOML configuration
//! - [`headless`] - Plain line output without the terminal UI
//! - [`theme`] - Terminal color palettes
//! - [`util`] - Text and time formatting helpers

pub mod config;
pub mod content;
pub mod engine;
pub mod feed;
pub mod headless;
pub mod theme;
pub mod util;
