//! Terminal User Interface module.
//!
//! A single-screen renderer for the feed engine. It only reads engine
//! snapshots and forwards user commands; all feed state lives in the engine.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `render` - Layout and render dispatch
//! - `header` - App title, read badge and category tabs
//! - `feed_list` - News card list with expandable details
//! - `status` - Status bar widget

mod feed_list;
mod header;
mod input;
mod loop_runner;
mod render;
mod status;

pub use loop_runner::run;
