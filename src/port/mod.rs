//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                 ┌──────────────────────────┐
//!                 │       Application        │
//!                 │  pipelines + matching    │
//!                 └────────────┬─────────────┘
//!      ┌─────────────┬─────────┴───┬──────────────┐
//!      ▼             ▼             ▼              ▼
//! ┌─────────┐  ┌──────────┐  ┌───────────┐  ┌──────────┐
//! │ Fetcher │  │ Catalog  │  │ Scheduler │  │ Notifier │
//! │ adapters│  │ adapter  │  │  adapter  │  │ adapters │
//! └─────────┘  └──────────┘  └───────────┘  └──────────┘
//! ```

pub mod outbound;

pub use outbound::catalog::{Catalog, RecipientDirectory};
pub use outbound::notifier::{Event, Notifier, NotifierRegistry, NullNotifier, RecipientId};
pub use outbound::scheduler::{JobId, JobTask, Scheduler};
pub use outbound::source::{BrowserListing, Fetcher, ListingBrowser, Normalizer, RawDocument};
