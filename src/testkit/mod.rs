//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for records, identities and search parameters.
//! - [`source`] - Scripted fetchers and normalizers, fixed listing sources.
//! - [`factory`] - [`ScriptedFactory`](factory::ScriptedFactory), a
//!   [`PipelineFactory`](crate::application::pipeline::PipelineFactory) over scripts.
//! - [`notifier`] - [`RecordingNotifier`](notifier::RecordingNotifier).
//! - [`scheduler`] - [`ManualScheduler`](scheduler::ManualScheduler), ticked by hand.

pub mod domain;
pub mod factory;
pub mod notifier;
pub mod scheduler;
pub mod source;
