//! The feed engine: filter, ordering, detail caching and read accounting.
//!
//! # Architecture
//!
//! - [`state`] - Synchronous state transitions (ingest, toggle, fetch completion)
//! - [`events`] - Events sent from background tasks, and engine errors
//! - `tasks` - Generator subscription and detail fetch tasks
//! - `feed_engine` - [`FeedEngine`], tying the state to its background tasks
//!
//! # Example
//!
//! ```ignore
//! use campusfeed::engine::{EngineSettings, FeedEngine};
//! use tokio::sync::mpsc;
//!
//! let (tx, mut rx) = mpsc::channel(32);
//! let mut engine = FeedEngine::new(EngineSettings::default(), tx);
//! engine.start();
//!
//! while let Some(event) = rx.recv().await {
//!     engine.handle_event(event);
//!     println!("{} items, {} read", engine.items().len(), engine.read_count());
//! }
//! ```

pub mod events;
mod feed_engine;
pub mod state;
mod tasks;

pub use events::{EngineError, EngineEvent};
pub use feed_engine::{EngineSettings, FeedEngine};
pub use state::{DisplayItem, EngineSnapshot, EngineState, EngineStats, ToggleOutcome};
