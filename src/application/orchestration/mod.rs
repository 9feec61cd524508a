//! Entry points that run matching rounds on demand or on a schedule.
//!
//! # Modules
//!
//! - [`search`]: [`SearchService`], interactive and scheduled rounds
//! - [`watch`]: [`WatchService`], per-recipient recurring jobs

pub mod search;
pub mod watch;

pub use search::{SearchService, SearchSettings};
pub use watch::{WatchService, WatchState, DEFAULT_INTERVAL};
