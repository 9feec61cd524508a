//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`]: the command-line interface driving the application
//! - [`outbound`]: marketplaces, notifiers, catalog and scheduler

pub mod inbound;
pub mod outbound;
