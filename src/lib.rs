//! floatarb - cross-marketplace skin arbitrage by wear float.
//!
//! Listings of one item are pulled from two marketplaces, paired by quantized
//! wear float, and reported when the cheaper side undercuts the other by at
//! least a configured percentage.
//!
//! # Architecture
//!
//! - **`stream`** - bounded single-consumer channel with an explicit close
//! - **`application::pipeline`** - fetcher/normalizer pairs driven concurrently
//! - **`application::matching`** - greedy best-candidate matching rounds
//! - **`application::orchestration`** - interactive and scheduled searches
//!
//! # Modules
//!
//! - [`adapter`] - CLI plus marketplace, notifier, catalog and scheduler adapters
//! - [`application`] - Use cases over the ports
//! - [`domain`] - Marketplace-agnostic types and arbitrage math
//! - [`error`] - Error types for the crate
//! - [`infrastructure`] - Configuration and wiring
//! - [`port`] - Trait definitions the adapters implement
//!
//! # Features
//!
//! - `telegram` - Telegram notifier (default)
//! - `testkit` - Test doubles for integration tests
//!
//! # Example
//!
//! ```no_run
//! use floatarb::domain::{Quality, SearchParameters};
//! use floatarb::infrastructure::config::settings::Config;
//! use floatarb::infrastructure::App;
//!
//! # async fn example() -> floatarb::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let app = App::build(&config)?;
//! let params = SearchParameters::new("AK-47", "Redline", Quality::FieldTested, false);
//! let matches = app.search.resolve_and_match(&params).await?;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
pub mod stream;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
