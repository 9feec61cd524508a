//! Factory modules for building infrastructure components.
//!
//! Provides factory functions that construct fully-configured infrastructure
//! components from application configuration.
//!
//! # Submodules
//!
//! - [`notifier`] - Notification registry construction
//! - [`pipeline`] - Source pipeline registry

pub mod notifier;
pub mod pipeline;

pub use notifier::build_notifier_registry;
pub use pipeline::PipelineRegistry;
