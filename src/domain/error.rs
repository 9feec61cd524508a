//! Domain validation errors for core domain types.
//!
//! These errors are returned by `try_new` constructors when an input
//! violates a domain invariant.
//!
//! # Examples
//!
//! ```
//! use floatarb::domain::error::DomainError;
//! use floatarb::domain::wear::Wear;
//!
//! let result = Wear::try_new(1.5);
//! assert!(matches!(result, Err(DomainError::WearOutOfRange { .. })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Wear floats live in the closed unit interval.
    #[error("wear must be within [0, 1], got {value}")]
    WearOutOfRange {
        /// The rejected value.
        value: f64,
    },

    /// Listing prices must be strictly positive.
    #[error("price must be positive, got {price}")]
    NonPositivePrice {
        /// The rejected price.
        price: rust_decimal::Decimal,
    },

    /// Quality tier text that matches none of the known tiers.
    #[error("unknown quality tier '{0}'")]
    UnknownQuality(String),
}
