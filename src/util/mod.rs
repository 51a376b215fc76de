//! Utility functions for common operations.
//!
//! - **Text processing**: Unicode-aware width calculation and truncation
//! - **Time formatting**: relative "N minutes ago" labels for items
//!
//! # Examples
//!
//! ```
//! use campusfeed::util::{display_width, truncate_to_width};
//!
//! let width = display_width("Campus");
//! assert_eq!(width, 6);
//! assert_eq!(truncate_to_width("Campus News Today", 10), "Campus ...");
//! ```

mod text;
mod time;

pub use text::{display_width, truncate_to_width};
pub use time::format_relative_time;
