//! Synthetic news feed production.
//!
//! This module provides the producer side of the simulation:
//!
//! - **Types**: items, categories and the consumer-side category filter
//! - **Titles**: the canned headline bank cycled by item id
//! - **Generator**: a timer-driven producer with a cancellable handle
//!
//! # Example
//!
//! ```ignore
//! use campusfeed::feed::FeedGenerator;
//! use std::ops::ControlFlow;
//!
//! let handle = FeedGenerator::new(FeedGenerator::DEFAULT_PERIOD).start(|item| async move {
//!     println!("#{} {}", item.id, item.title);
//!     ControlFlow::Continue(())
//! });
//! // ... later
//! handle.cancel();
//! ```

mod generator;
mod titles;
mod types;

pub use generator::{FeedGenerator, GeneratorHandle, IdSequence};
pub use titles::{title_for, TITLE_BANK};
pub use types::{Category, CategoryFilter, ItemId, ParseCategoryError, RawItem};
