//! Search parameters shared by both sides of a round.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::quality::Quality;

/// What to search for: one skin in one quality tier.
///
/// Immutable once built; both pipelines of a round derive their locators
/// from the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchParameters {
    item_class: String,
    pattern: String,
    quality: Quality,
    stattrak: bool,
}

impl SearchParameters {
    pub fn new(
        item_class: impl Into<String>,
        pattern: impl Into<String>,
        quality: Quality,
        stattrak: bool,
    ) -> Self {
        Self {
            item_class: item_class.into(),
            pattern: pattern.into(),
            quality,
            stattrak,
        }
    }

    /// Weapon family, e.g. `AK-47`.
    #[must_use]
    pub fn item_class(&self) -> &str {
        &self.item_class
    }

    /// Skin name, e.g. `Redline`.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub const fn quality(&self) -> Quality {
        self.quality
    }

    /// Whether the StatTrak variant is requested.
    #[must_use]
    pub const fn is_stattrak(&self) -> bool {
        self.stattrak
    }

    /// Same item with a different item class and pattern, e.g. after
    /// canonicalizing user input.
    #[must_use]
    pub fn renamed(&self, item_class: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            item_class: item_class.into(),
            pattern: pattern.into(),
            ..self.clone()
        }
    }
}

impl fmt::Display for SearchParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stattrak {
            f.write_str("StatTrak™ ")?;
        }
        write!(f, "{} | {} ({})", self.item_class, self.pattern, self.quality)
    }
}
