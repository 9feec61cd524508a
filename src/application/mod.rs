//! Application services (use cases).
//!
//! These services drive the source pipelines and the matching engine and
//! hand outcomes to the outbound ports.

pub mod matching;
pub mod orchestration;
pub mod pipeline;
