//! Infrastructure configuration modules.

pub mod logging;
pub mod matching;
pub mod schedule;
pub mod settings;
pub mod telegram;

pub use settings::Config;
